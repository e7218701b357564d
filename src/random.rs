//! Ranged random helpers over the thread-local `fastrand` generator.

/// Uniform float between `a` and `b`. The bounds may be given in either order.
pub fn uniform(a: f64, b: f64) -> f64 {
    a + (b - a) * fastrand::f64()
}

/// Uniform integer in `min..=max`.
pub fn int_inclusive(min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    fastrand::i32(min..=max)
}

/// Returns true with probability `p` (0.0..=1.0).
pub fn chance(p: f64) -> bool {
    fastrand::f64() < p
}
