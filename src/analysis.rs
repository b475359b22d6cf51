// =============================================================================
// Analysis Summaries — current values and classifications
// =============================================================================
//
// Presentation helpers layered over the raw indicator series: the latest
// defined reading of each series, rounded for display, and a coarse label
// derived from it. The indicator engine itself never rounds.
// =============================================================================

use serde::Serialize;

use crate::indicators::{last_defined, last_defined_index, BollingerResult, MacdResult};
use crate::types::{BandPosition, MacdTrend, RsiSignal};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// RSI
// =============================================================================

/// Latest RSI reading, rounded to two decimals.
pub fn current_rsi(series: &[Option<f64>]) -> Option<f64> {
    last_defined(series).map(|v| round_to(v, 2))
}

/// Classify an RSI reading. No reading at all counts as neutral.
pub fn classify_rsi(current: Option<f64>) -> RsiSignal {
    match current {
        Some(v) if v > RSI_OVERBOUGHT => RsiSignal::Overbought,
        Some(v) if v < RSI_OVERSOLD => RsiSignal::Oversold,
        _ => RsiSignal::default(),
    }
}

// =============================================================================
// MACD
// =============================================================================

/// Latest MACD, signal and histogram readings, rounded to four decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacdCurrent {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

pub fn current_macd(result: &MacdResult) -> MacdCurrent {
    let latest = |series: &[Option<f64>]| last_defined(series).map(|v| round_to(v, 4));
    MacdCurrent {
        macd: latest(&result.macd_line),
        signal: latest(&result.signal_line),
        histogram: latest(&result.histogram),
    }
}

/// Bullish when the MACD line is above its signal line, bearish otherwise.
/// Neutral until both lines have a reading.
pub fn macd_trend(current: &MacdCurrent) -> MacdTrend {
    match (current.macd, current.signal) {
        (Some(m), Some(s)) if m > s => MacdTrend::Bullish,
        (Some(_), Some(_)) => MacdTrend::Bearish,
        _ => MacdTrend::default(),
    }
}

// =============================================================================
// Bollinger Bands
// =============================================================================

/// Latest close and the band readings at the last fully defined position,
/// rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerCurrent {
    pub price: Option<f64>,
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
}

pub fn current_bollinger(closes: &[f64], result: &BollingerResult) -> BollingerCurrent {
    let at = |series: &[Option<f64>], i: usize| series[i].map(|v| round_to(v, 2));

    let (upper, middle, lower) = match last_defined_index(&result.upper_band) {
        Some(i) => (
            at(&result.upper_band, i),
            at(&result.middle_band, i),
            at(&result.lower_band, i),
        ),
        None => (None, None, None),
    };

    BollingerCurrent {
        price: closes.last().copied(),
        upper,
        middle,
        lower,
    }
}

/// Position of the latest close relative to the envelope.
pub fn band_position(current: &BollingerCurrent) -> BandPosition {
    match (current.price, current.upper, current.lower) {
        (Some(p), Some(upper), _) if p > upper => BandPosition::AboveUpper,
        (Some(p), _, Some(lower)) if p < lower => BandPosition::BelowLower,
        _ => BandPosition::default(),
    }
}

/// Band width as a percentage of the middle band. `None` without a full set
/// of readings or with a zero middle band.
pub fn bandwidth_percent(current: &BollingerCurrent) -> Option<f64> {
    let (upper, middle, lower) = (current.upper?, current.middle?, current.lower?);
    if middle == 0.0 {
        return None;
    }
    Some(round_to((upper - lower) / middle * 100.0, 2))
}
