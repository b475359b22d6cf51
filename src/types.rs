// =============================================================================
// Shared types used across the TradePro analysis service
// =============================================================================

use serde::{Deserialize, Serialize};

/// RSI reading classified against the 70 / 30 thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSignal {
    Overbought,
    Oversold,
    Neutral,
}

impl Default for RsiSignal {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for RsiSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "overbought"),
            Self::Oversold => write!(f, "oversold"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Direction implied by the MACD line relative to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdTrend {
    Bullish,
    Bearish,
    Neutral,
}

impl Default for MacdTrend {
    fn default() -> Self {
        Self::Neutral
    }
}

impl std::fmt::Display for MacdTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "bullish"),
            Self::Bearish => write!(f, "bearish"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// Where the latest close sits relative to the Bollinger envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    AboveUpper,
    BelowLower,
    InsideBand,
}

impl Default for BandPosition {
    fn default() -> Self {
        Self::InsideBand
    }
}

impl std::fmt::Display for BandPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AboveUpper => write!(f, "above_upper"),
            Self::BelowLower => write!(f, "below_lower"),
            Self::InsideBand => write!(f, "inside_band"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_wire_format() {
        for signal in [RsiSignal::Overbought, RsiSignal::Oversold, RsiSignal::Neutral] {
            let json = serde_json::to_string(&signal).unwrap();
            assert_eq!(json, format!("\"{signal}\""));
        }
        for trend in [MacdTrend::Bullish, MacdTrend::Bearish, MacdTrend::Neutral] {
            let json = serde_json::to_string(&trend).unwrap();
            assert_eq!(json, format!("\"{trend}\""));
        }
        for pos in [BandPosition::AboveUpper, BandPosition::BelowLower, BandPosition::InsideBand] {
            let json = serde_json::to_string(&pos).unwrap();
            assert_eq!(json, format!("\"{pos}\""));
        }
    }

    #[test]
    fn defaults_are_neutral() {
        assert_eq!(RsiSignal::default(), RsiSignal::Neutral);
        assert_eq!(MacdTrend::default(), MacdTrend::Neutral);
        assert_eq!(BandPosition::default(), BandPosition::InsideBand);
    }
}
