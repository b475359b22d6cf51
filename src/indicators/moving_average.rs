// =============================================================================
// Moving Averages — SMA and EMA
// =============================================================================
//
// The two primitives every other indicator is composed from.
//
// SMA_i = mean(close_{i-period+1} ..= close_i)
//
// EMA:
//   multiplier = 2 / (period + 1)
//   EMA_t      = (close_t - EMA_{t-1}) * multiplier + EMA_{t-1}
//
// The first EMA value (index `period - 1`) is seeded with the SMA of the first
// `period` closes, not with the first close.
// =============================================================================

use super::IndicatorSeries;

/// Simple moving average over a trailing window of exactly `period` closes.
///
/// Positions `0..period-1` are `None`. A `period` longer than the series (or
/// zero) yields an all-`None` series of the same length.
pub fn sma(closes: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || closes.len() < period {
        return vec![None; closes.len()];
    }

    let mut result = vec![None; period - 1];
    result.reserve(closes.len() - period + 1);
    result.extend(
        closes
            .windows(period)
            .map(|window| Some(window.iter().sum::<f64>() / period as f64)),
    );
    result
}

/// Exponential moving average with smoothing factor `2 / (period + 1)`.
///
/// # Edge cases
/// - `period == 0` => all `None`
/// - `closes.len() < period` => all `None`
/// - `closes.len() == period` => only the SMA seed at the last index
pub fn ema(closes: &[f64], period: usize) -> IndicatorSeries {
    if period == 0 || closes.len() < period {
        return vec![None; closes.len()];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of the first `period` values.
    let seed = closes[..period].iter().sum::<f64>() / period as f64;

    let mut result = vec![None; period - 1];
    result.reserve(closes.len() - period + 1);
    result.push(Some(seed));

    let mut prev = seed;
    for &close in &closes[period..] {
        prev = (close - prev) * multiplier + prev;
        result.push(Some(prev));
    }

    result
}
