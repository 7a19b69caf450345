/// Random number generator (xorshift32)
#[inline]
pub(crate) fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Uniform float in `[0, 1]`.
#[inline]
pub(crate) fn frand(state: &mut u32) -> f32 {
    xorshift32(state) as f32 / u32::MAX as f32
}

/// xorshift has a fixed point at zero.
#[inline]
pub(crate) fn seed_state(seed: u32) -> u32 {
    if seed == 0 { 12345 } else { seed }
}
