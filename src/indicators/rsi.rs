// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Output alignment: index 0 has no delta and is always `None`; the seeded
// value lands on price index `period`.
// =============================================================================

use super::IndicatorSeries;

/// Default look-back used by the API when none is supplied.
pub const DEFAULT_PERIOD: usize = 14;

/// Compute the full RSI series for the given `closes` and `period`.
///
/// The returned vector has the same length as `closes`. The first `period`
/// entries are `None`; entry `period` is computed from the seeded averages and
/// every later entry from Wilder-smoothed averages.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `closes.len() <= period` => all `None` (need at least `period` deltas)
/// - If average loss is zero (no down moves, including a flat market), RSI is
///   100.0.
pub fn rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || closes.len() <= period {
        return vec![None; closes.len()];
    }

    // --- Split deltas into gains and losses ----------------------------------
    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let delta = w[1] - w[0];
            let gain = if delta > 0.0 { delta } else { 0.0 };
            let loss = if delta < 0.0 { -delta } else { 0.0 };
            (gain, loss)
        })
        .unzip();

    // --- Seed averages with SMA of first `period` deltas ---------------------
    let period_f = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period_f;

    let mut result = vec![None; period];
    result.reserve(closes.len() - period);
    result.push(Some(rsi_from_averages(avg_gain, avg_loss)));

    // --- Wilder's smoothing for subsequent values ----------------------------
    for (&gain, &loss) in gains[period..].iter().zip(&losses[period..]) {
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        result.push(Some(rsi_from_averages(avg_gain, avg_loss)));
    }

    result
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// Zero average loss saturates at 100.0 instead of dividing by zero. Zero
/// average gain with a positive average loss gives RS = 0 and therefore 0.0.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::leading_undefined;

    #[test]
    fn rsi_empty_input() {
        assert!(rsi(&[], 14).is_empty());
    }

    #[test]
    fn rsi_period_zero() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 0), vec![None, None, None]);
    }

    #[test]
    fn rsi_insufficient_data() {
        // Need period+1 closes (period deltas). 14 closes => 13 deltas < 14.
        let closes: Vec<f64> = (1..=14).map(|x| x as f64).collect();
        let series = rsi(&closes, 14);
        assert_eq!(series.len(), 14);
        assert!(series.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_huge_period_is_all_undefined() {
        assert_eq!(rsi(&[1.0, 2.0, 3.0], usize::MAX), vec![None, None, None]);
    }

    #[test]
    fn rsi_sixteen_ascending_closes() {
        let closes: Vec<f64> = (1..=16).map(|x| x as f64).collect();
        let series = rsi(&closes, 14);
        assert_eq!(series.len(), 16);
        assert_eq!(leading_undefined(&series), 14);
        assert_eq!(series[14], Some(100.0));
        assert_eq!(series[15], Some(100.0));
    }

    #[test]
    fn rsi_all_gains() {
        // Strictly ascending prices => RSI should be exactly 100.
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let series = rsi(&closes, 14);
        for v in &series[14..] {
            assert_eq!(*v, Some(100.0));
        }
    }

    #[test]
    fn rsi_all_losses() {
        // Strictly descending prices => average gain is zero => RSI 0.
        let closes: Vec<f64> = (1..=30).rev().map(|x| x as f64).collect();
        let series = rsi(&closes, 14);
        for v in &series[14..] {
            assert!(v.unwrap().abs() < 1e-10, "expected 0.0, got {v:?}");
        }
    }

    #[test]
    fn rsi_flat_market_saturates() {
        // No price change at all => avg_loss == 0 => 100, not NaN.
        let closes = vec![100.0; 30];
        let series = rsi(&closes, 14);
        assert_eq!(leading_undefined(&series), 14);
        for v in &series[14..] {
            assert_eq!(*v, Some(100.0));
        }
    }

    #[test]
    fn rsi_range_check() {
        // Arbitrary data — RSI must always be in [0, 100].
        let closes = vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 44.18, 44.22, 44.57, 43.42, 42.66, 43.13,
        ];
        let series = rsi(&closes, 14);
        assert_eq!(series.len(), closes.len());
        for v in series.iter().flatten() {
            assert!((0.0..=100.0).contains(v), "RSI {v} out of range");
        }
    }

    #[test]
    fn rsi_uses_wilder_recursion() {
        // period 2: deltas +2, -1, +3
        let closes = vec![10.0, 12.0, 11.0, 14.0];
        let series = rsi(&closes, 2);
        assert!(series[..2].iter().all(Option::is_none));

        // Seed: avg_gain = 1.0, avg_loss = 0.5 => RS = 2 => 66.67
        let seed = series[2].unwrap();
        assert!((seed - (100.0 - 100.0 / 3.0)).abs() < 1e-10);

        // Wilder: avg_gain = (1.0 + 3) / 2 = 2.0, avg_loss = (0.5 + 0) / 2 = 0.25
        // A fresh window over the last two deltas would give 1.5 / 0.5 instead.
        let smoothed = series[3].unwrap();
        assert!((smoothed - (100.0 - 100.0 / 9.0)).abs() < 1e-10);
    }

    #[test]
    fn rsi_from_averages_edges() {
        assert_eq!(rsi_from_averages(0.0, 0.0), 100.0);
        assert_eq!(rsi_from_averages(5.0, 0.0), 100.0);
        assert_eq!(rsi_from_averages(0.0, 5.0), 0.0);
        assert!((rsi_from_averages(1.0, 1.0) - 50.0).abs() < 1e-10);
    }

    #[test]
    fn rsi_is_idempotent() {
        let closes = vec![3.0, 2.5, 2.75, 3.5, 3.25, 4.0, 3.0, 3.5];
        assert_eq!(rsi(&closes, 3), rsi(&closes, 3));
    }
}
