use crate::error::SignalError;

/// Readings needed before a trend is defined.
pub const MIN_READINGS: usize = 2;

/// How a window of readings is reduced to one signed drift value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrendKind {
    /// Net change across the whole window.
    LastMinusFirst,
    /// Change between the two most recent readings.
    LastMinusPrevious,
    /// Median of successive differences. Resists single-reading spikes in
    /// short noisy windows.
    MedianDiff,
}

impl Default for TrendKind {
    fn default() -> Self {
        TrendKind::MedianDiff
    }
}

/// Estimate the drift of a reading window.
///
/// Fails with `InsufficientData` when the window holds fewer than two
/// readings; a single reading has no direction.
pub fn estimate(values: &[f32], kind: TrendKind) -> Result<f32, SignalError> {
    let n = values.len();
    if n < MIN_READINGS {
        return Err(SignalError::InsufficientData {
            got: n,
            need: MIN_READINGS,
        });
    }
    let drift = match kind {
        TrendKind::LastMinusFirst => values[n - 1] - values[0],
        TrendKind::LastMinusPrevious => values[n - 1] - values[n - 2],
        TrendKind::MedianDiff => median_diff(values),
    };
    Ok(drift)
}

fn median_diff(values: &[f32]) -> f32 {
    let mut diffs: Vec<f32> = values.windows(2).map(|w| w[1] - w[0]).collect();
    diffs.sort_by(f32::total_cmp);
    let mid = diffs.len() / 2;
    if diffs.len() % 2 == 1 {
        diffs[mid]
    } else {
        0.5 * (diffs[mid - 1] + diffs[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_is_insufficient() {
        let err = estimate(&[], TrendKind::MedianDiff).unwrap_err();
        assert_eq!(err, SignalError::InsufficientData { got: 0, need: 2 });
    }

    #[test]
    fn single_reading_is_insufficient() {
        for kind in [
            TrendKind::LastMinusFirst,
            TrendKind::LastMinusPrevious,
            TrendKind::MedianDiff,
        ] {
            let err = estimate(&[5.0], kind).unwrap_err();
            assert_eq!(err, SignalError::InsufficientData { got: 1, need: 2 });
        }
    }

    #[test]
    fn all_kinds_agree_on_a_pair() {
        for kind in [
            TrendKind::LastMinusFirst,
            TrendKind::LastMinusPrevious,
            TrendKind::MedianDiff,
        ] {
            assert_eq!(estimate(&[1.0, 5.0], kind).unwrap(), 4.0);
            assert_eq!(estimate(&[1.0, 1.0], kind).unwrap(), 0.0);
        }
    }

    #[test]
    fn last_minus_first_spans_the_window() {
        let window = [0.0, 0.3, 0.1, 0.8];
        let drift = estimate(&window, TrendKind::LastMinusFirst).unwrap();
        assert!((drift - 0.8).abs() < 1e-6);
    }

    #[test]
    fn last_minus_previous_ignores_history() {
        let window = [9.0, 9.0, 9.0, 2.0, 2.5];
        let drift = estimate(&window, TrendKind::LastMinusPrevious).unwrap();
        assert!((drift - 0.5).abs() < 1e-6);
    }

    #[test]
    fn median_diff_odd_count_takes_middle() {
        // Diffs: [0.1, 0.5, -0.2] -> sorted [-0.2, 0.1, 0.5] -> 0.1.
        let window = [0.0, 0.1, 0.6, 0.4];
        let drift = estimate(&window, TrendKind::MedianDiff).unwrap();
        assert!((drift - 0.1).abs() < 1e-6);
    }

    #[test]
    fn median_diff_even_count_averages_middles() {
        // Diffs: [0.1, 0.08, 0.07, 0.04] -> median (0.07 + 0.08) / 2.
        let window = [0.0, 0.1, 0.18, 0.25, 0.29];
        let drift = estimate(&window, TrendKind::MedianDiff).unwrap();
        assert!((drift - 0.075).abs() < 1e-6);
    }

    #[test]
    fn median_diff_shrugs_off_a_spike() {
        // One wild reading produces two outlier diffs; the median stays on
        // the underlying slope.
        let steady = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6];
        let spiked = [0.0, 0.1, 0.2, 5.0, 0.4, 0.5, 0.6];
        let a = estimate(&steady, TrendKind::MedianDiff).unwrap();
        let b = estimate(&spiked, TrendKind::MedianDiff).unwrap();
        assert!((a - 0.1).abs() < 1e-6);
        assert!((b - 0.1).abs() < 1e-6);
    }
}
