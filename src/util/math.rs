//! Small numeric helpers for score handling.

/// Clamps a raw correlation score from `[-1, 1]` into `[0, 1]`.
///
/// Negative correlation carries no evidence that the template is present,
/// so it collapses to zero instead of being rescaled.
pub(crate) fn clamp_unit(score: f32) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}
