// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the *sample* standard deviation
// (divisor n - 1) of the trailing `period` closes.

use serde::Serialize;

use super::{sma, IndicatorSeries};

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_STD_DEV: f64 = 2.0;

/// Parameters used for a Bollinger calculation, echoed back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollingerSettings {
    pub period: usize,
    pub std_dev: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            std_dev: DEFAULT_STD_DEV,
        }
    }
}

/// Result of a Bollinger Band calculation. All bands have the input's length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerResult {
    pub upper_band: IndicatorSeries,
    pub middle_band: IndicatorSeries,
    pub lower_band: IndicatorSeries,
    pub settings: BollingerSettings,
}

/// Calculate Bollinger Bands for the given closing prices.
///
/// - `middle_band` = SMA(`period`)
/// - `upper_band`  = middle + `std_dev` * σ
/// - `lower_band`  = middle - `std_dev` * σ
///
/// Positions before `period - 1` are `None` in all three bands. With
/// `period == 1` the sample deviation has no degrees of freedom, so the
/// middle band is defined but the upper and lower bands stay `None`.
pub fn bollinger_bands(closes: &[f64], settings: BollingerSettings) -> BollingerResult {
    let period = settings.period;
    let middle_band = sma(closes, period);

    let mut upper_band = vec![None; closes.len()];
    let mut lower_band = vec![None; closes.len()];

    if period >= 2 && closes.len() >= period {
        for (offset, window) in closes.windows(period).enumerate() {
            let i = offset + period - 1;
            let Some(middle) = middle_band[i] else {
                continue;
            };
            let width = settings.std_dev * sample_std_dev(window, middle);
            upper_band[i] = Some(middle + width);
            lower_band[i] = Some(middle - width);
        }
    }

    BollingerResult {
        upper_band,
        middle_band,
        lower_band,
        settings,
    }
}

/// Sample standard deviation of `window` around its precomputed `mean`.
/// Callers guarantee `window.len() >= 2`.
fn sample_std_dev(window: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = window.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / (window.len() - 1) as f64).sqrt()
}
