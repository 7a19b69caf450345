//! Stage timing for the step pipeline
//!
//! Every timed stage goes through [`PerfTimer::measure`], which skips the
//! clock entirely while perf metrics are off. Resolution is whatever the host
//! clock gives: whole milliseconds from `Date.now()` in most browsers.

#[cfg(target_arch = "wasm32")]
use js_sys;

/// Wall-clock stopwatch: `Date.now()` in the browser, `Instant` natively.
#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    /// Start counting from now.
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { start: std::time::Instant::now() }
        }
    }

    /// Milliseconds since [`PerfTimer::start`], fractional on native targets.
    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }

    /// Time `f` when `enabled`, storing milliseconds in `slot`.
    #[inline]
    pub(crate) fn measure<T>(enabled: bool, slot: &mut f64, f: impl FnOnce() -> T) -> T {
        if !enabled {
            return f();
        }
        let timer = PerfTimer::start();
        let out = f();
        *slot = timer.elapsed_ms();
        out
    }
}
