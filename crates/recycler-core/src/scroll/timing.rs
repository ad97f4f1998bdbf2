//! Time calculations for tick-driven animations
//!
//! Animations accumulate elapsed time from tick deltas instead of reading a
//! wall clock, so a run is reproducible from its tick sequence.

use std::time::Duration;

/// Animation progress (0.0 to 1.0) from accumulated elapsed time
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation between two indices, rounded to the nearest index
#[inline]
pub fn lerp_index(from: usize, to: usize, t: f64) -> usize {
    lerp(from as f64, to as f64, t).round().max(0.0) as usize
}

/// Duration of a scroll-to-index animation covering `distance` items
///
/// Proportional to distance at `items_per_second`, capped at `max_secs`.
pub fn scroll_duration(distance: usize, items_per_second: f32, max_secs: f32) -> Duration {
    if items_per_second <= 0.0 {
        return Duration::from_secs_f32(max_secs.max(0.0));
    }
    let secs = (distance as f32 / items_per_second).min(max_secs).max(0.0);
    Duration::from_secs_f32(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_lerp_index_both_directions() {
        assert_eq!(lerp_index(0, 6, 0.0), 0);
        assert_eq!(lerp_index(0, 6, 0.5), 3);
        assert_eq!(lerp_index(10, 2, 0.5), 6);
        assert_eq!(lerp_index(10, 2, 1.0), 2);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_is_clamped() {
        let duration = Duration::from_millis(100);
        assert!((progress(Duration::from_millis(50), duration) - 0.5).abs() < 0.001);
        assert!((progress(Duration::from_millis(500), duration) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_scroll_duration_is_distance_proportional_and_capped() {
        assert_eq!(scroll_duration(20, 40.0, 2.0), Duration::from_secs_f32(0.5));
        assert_eq!(scroll_duration(1000, 40.0, 2.0), Duration::from_secs_f32(2.0));
    }
}
