use serde::Serialize;

use super::{PerfTimer, SimulationCore};

/// Wall time of a batch of steps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub iterations: u32,
    pub total_ms: f64,
    pub avg_iteration_us: f64,
}

impl RunSummary {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}

pub(super) fn run(sim: &mut SimulationCore, iterations: u32) -> RunSummary {
    let timer = PerfTimer::start();
    for _ in 0..iterations {
        sim.step();
    }
    let total_ms = timer.elapsed_ms();

    let avg_iteration_us = if iterations == 0 {
        0.0
    } else {
        total_ms * 1000.0 / iterations as f64
    };

    log::info!(
        "ran {} iterations of {} particles in {:.3} ms ({:.3} us/iteration)",
        iterations,
        sim.particle_count(),
        total_ms,
        avg_iteration_us
    );

    RunSummary {
        iterations,
        total_ms,
        avg_iteration_us,
    }
}
