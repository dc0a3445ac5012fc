//! Easing Functions

/// Quartic ease-in-out
///
/// `8x^4` for `x < 0.5`, else `1 - (-2x + 2)^4 / 2`. Softens the
/// non-extrapolated component of the pose blend near segment boundaries.
pub fn quartic_ease_in_out(x: f64) -> f64 {
    if x < 0.5 {
        8.0 * x.powi(4)
    } else {
        1.0 - (-2.0 * x + 2.0).powi(4) / 2.0
    }
}
