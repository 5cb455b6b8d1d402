//! Time and ordering helpers shared by the locator and interpolator.

use kform_models::Formation;

/// Fraction of the way from `start` to `end` at time `t`, clamped to `[0, 1]`.
///
/// A zero or negative span (duplicate or inverted timestamps) snaps to the end
/// of the interval, as does a NaN result, so callers never see NaN progress.
pub fn progress(start: f64, end: f64, t: f64) -> f64 {
    let duration = end - start;
    if duration.is_nan() || duration <= 0.0 {
        return 1.0;
    }

    let p = (t - start) / duration;
    if p.is_nan() {
        return 1.0;
    }
    p.clamp(0.0, 1.0)
}

/// Linear blend between `from` and `to`.
pub fn lerp(from: f64, to: f64, progress: f64) -> f64 {
    from + (to - from) * progress
}

/// Formations ordered by time, ascending.
///
/// The sort is stable, so formations sharing a timestamp keep their input
/// order. NaN times, whatever their sign bit, order after every other time.
pub fn sorted_by_time(formations: &[Formation]) -> Vec<&Formation> {
    let mut sorted: Vec<&Formation> = formations.iter().collect();
    sorted.sort_by(|a, b| sort_key(a.time).total_cmp(&sort_key(b.time)));
    sorted
}

// `total_cmp` puts sign-bit NaN before -inf; clear the sign so every NaN sorts last.
fn sort_key(time: f64) -> f64 {
    if time.is_nan() {
        time.abs()
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_inside_interval() {
        assert_eq!(progress(0.0, 10.0, 5.0), 0.5);
        assert_eq!(progress(10.0, 20.0, 12.5), 0.25);
    }

    #[test]
    fn test_progress_clamps() {
        assert_eq!(progress(0.0, 10.0, -3.0), 0.0);
        assert_eq!(progress(0.0, 10.0, 15.0), 1.0);
        assert_eq!(progress(0.0, 10.0, f64::INFINITY), 1.0);
    }

    #[test]
    fn test_progress_degenerate_span() {
        assert_eq!(progress(5.0, 5.0, 0.0), 1.0);
        assert_eq!(progress(10.0, 5.0, 7.0), 1.0);
        assert_eq!(progress(0.0, 10.0, f64::NAN), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(80.0, 20.0, 0.25), 65.0);
    }

    #[test]
    fn test_sorted_by_time_is_stable() {
        let formations = vec![
            Formation::new("late", 10.0, Vec::new()),
            Formation::new("tie-a", 5.0, Vec::new()),
            Formation::new("tie-b", 5.0, Vec::new()),
            Formation::new("early", 0.0, Vec::new()),
        ];

        let ids: Vec<&str> = sorted_by_time(&formations).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "tie-a", "tie-b", "late"]);
    }

    #[test]
    fn test_sorted_by_time_nan_last() {
        let formations = vec![
            Formation::new("neg-nan", -f64::NAN, Vec::new()),
            Formation::new("nan", f64::NAN, Vec::new()),
            Formation::new("inf", f64::INFINITY, Vec::new()),
            Formation::new("neg-inf", f64::NEG_INFINITY, Vec::new()),
            Formation::new("zero", 0.0, Vec::new()),
        ];

        let ids: Vec<&str> = sorted_by_time(&formations).iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["neg-inf", "zero", "inf", "neg-nan", "nan"]);
    }
}
