//! Easing curves for scroll-to-index animations
//!
//! A curve maps animation progress in [0, 1] to the fraction of the index
//! distance already covered. Every curve starts at the start index and ends
//! exactly on the target, and none of them overshoots in between, so the
//! scroller never walks past the requested item and back.

use super::timing::lerp_index;
use crate::config::EasingType;

impl EasingType {
    /// Fraction of the distance covered at progress `t` (clamped to [0, 1])
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Hold the start index, then land on the target in one step
            EasingType::None => f64::from(u8::from(t >= 1.0)),
            EasingType::Linear => t,
            EasingType::Cubic => ease_out_pow(t, 3),
            EasingType::Quintic => ease_out_pow(t, 5),
            EasingType::EaseOut if t >= 1.0 => 1.0,
            EasingType::EaseOut => 1.0 - 2.0_f64.powf(-10.0 * t),
        }
    }

    /// Top index the animation should show at progress `t`
    pub fn index_at(&self, from: usize, to: usize, t: f64) -> usize {
        lerp_index(from, to, self.apply(t))
    }
}

/// 1 - (1 - t)^n: fast start, decelerating into the target
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}
