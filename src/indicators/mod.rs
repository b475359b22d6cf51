// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free transforms over a complete series of closing prices.
// Every transform returns output aligned with its input: element `i` of any
// output series describes the state as of price index `i`. Positions without
// enough history are `None`, never zero and never NaN.

pub mod bollinger;
pub mod macd;
pub mod moving_average;
pub mod rsi;

pub use bollinger::{bollinger_bands, BollingerResult, BollingerSettings};
pub use macd::{macd, MacdResult, MacdSettings};
pub use moving_average::{ema, sma};
pub use rsi::rsi;

/// An indicator output aligned index-for-index with its price series.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Number of leading undefined positions (the warm-up span).
pub fn leading_undefined(series: &[Option<f64>]) -> usize {
    series.iter().take_while(|v| v.is_none()).count()
}

/// Index of the most recent defined value, scanning from the end.
pub fn last_defined_index(series: &[Option<f64>]) -> Option<usize> {
    series.iter().rposition(Option::is_some)
}

/// Most recent defined value of a series.
pub fn last_defined(series: &[Option<f64>]) -> Option<f64> {
    series.iter().rev().find_map(|v| *v)
}

/// Combine two aligned series element-wise; a position is defined only when
/// both inputs are.
fn zip_defined(
    a: &[Option<f64>],
    b: &[Option<f64>],
    f: impl Fn(f64, f64) -> f64,
) -> IndicatorSeries {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some(f(*x, *y)),
            _ => None,
        })
        .collect()
}
