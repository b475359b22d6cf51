// =============================================================================
// MACD — Moving Average Convergence Divergence
// =============================================================================
//
// MACD line = EMA(fast) - EMA(slow)
// Signal    = EMA(signal) of the MACD line
// Histogram = MACD line - Signal
//
// The MACD line has an undefined warm-up prefix. The signal EMA is applied to
// the dense, defined suffix only and the result is left-padded back to the
// input length, so every output stays aligned with the price series.
// =============================================================================

use serde::Serialize;

use super::{ema, leading_undefined, zip_defined, IndicatorSeries};

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Periods used for a MACD calculation, echoed back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacdSettings {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdSettings {
    fn default() -> Self {
        Self {
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            signal_period: DEFAULT_SIGNAL_PERIOD,
        }
    }
}

/// Result of a MACD calculation. All three series have the input's length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdResult {
    pub macd_line: IndicatorSeries,
    pub signal_line: IndicatorSeries,
    pub histogram: IndicatorSeries,
    pub settings: MacdSettings,
}

/// Compute MACD, signal and histogram series for `closes`.
///
/// With the conventional `slow > fast`, the MACD line is `None` before index
/// `slow - 1`. The signal line is `None` for a further `signal - 1` positions,
/// or entirely when the defined MACD suffix is shorter than `signal`.
pub fn macd(closes: &[f64], settings: MacdSettings) -> MacdResult {
    let ema_fast = ema(closes, settings.fast_period);
    let ema_slow = ema(closes, settings.slow_period);

    let macd_line = zip_defined(&ema_fast, &ema_slow, |fast, slow| fast - slow);
    let signal_line = signal_over_defined(&macd_line, settings.signal_period);
    let histogram = zip_defined(&macd_line, &signal_line, |m, s| m - s);

    MacdResult {
        macd_line,
        signal_line,
        histogram,
        settings,
    }
}

/// Strip the undefined prefix, apply EMA to the dense remainder, then restore
/// the prefix so the result realigns with `line`.
fn signal_over_defined(line: &[Option<f64>], period: usize) -> IndicatorSeries {
    let prefix = leading_undefined(line);
    let dense: Vec<f64> = line[prefix..].iter().map_while(|v| *v).collect();

    let mut signal = vec![None; prefix];
    signal.reserve(line.len() - prefix);
    signal.extend(ema(&dense, period));
    // Pads the tail should the defined run end early.
    signal.resize(line.len(), None);
    signal
}
