// =============================================================================
// Runtime Configuration — service settings and indicator defaults
// =============================================================================
//
// Loaded once at startup from a JSON file. All fields carry `#[serde(default)]`
// so that a partial (or empty) file still loads, and a missing file falls back
// to defaults in `main`. Indicator defaults that the request guards would
// reject are replaced wholesale by the built-in defaults.
//
// =============================================================================

use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::indicators::{bollinger, macd, rsi};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:5001".to_string()
}

fn default_rsi_period() -> usize {
    rsi::DEFAULT_PERIOD
}

fn default_macd_fast() -> usize {
    macd::DEFAULT_FAST_PERIOD
}

fn default_macd_slow() -> usize {
    macd::DEFAULT_SLOW_PERIOD
}

fn default_macd_signal() -> usize {
    macd::DEFAULT_SIGNAL_PERIOD
}

fn default_bb_period() -> usize {
    bollinger::DEFAULT_PERIOD
}

fn default_bb_std_dev() -> f64 {
    bollinger::DEFAULT_STD_DEV
}

// =============================================================================
// IndicatorDefaults
// =============================================================================

/// Parameters applied when a request omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorDefaults {
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_macd_signal")]
    pub macd_signal: usize,

    /// Bollinger look-back; must be at least 2 for a sample deviation.
    #[serde(default = "default_bb_period")]
    pub bb_period: usize,

    /// Bollinger band width in standard deviations.
    #[serde(default = "default_bb_std_dev")]
    pub bb_std_dev: f64,
}

impl Default for IndicatorDefaults {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            macd_signal: default_macd_signal(),
            bb_period: default_bb_period(),
            bb_std_dev: default_bb_std_dev(),
        }
    }
}

impl IndicatorDefaults {
    /// Check the same bounds the request layer enforces on explicit parameters.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rsi_period >= 1, "rsi_period must be at least 1");
        ensure!(self.macd_fast >= 1, "macd_fast must be at least 1");
        ensure!(self.macd_signal >= 1, "macd_signal must be at least 1");
        ensure!(
            self.macd_fast < self.macd_slow,
            "macd_fast ({}) must be below macd_slow ({})",
            self.macd_fast,
            self.macd_slow
        );
        ensure!(self.bb_period >= 2, "bb_period must be at least 2");
        ensure!(
            self.bb_std_dev.is_finite() && self.bb_std_dev > 0.0,
            "bb_std_dev must be finite and positive"
        );
        Ok(())
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level configuration for the analysis service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Socket address the HTTP API binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub defaults: IndicatorDefaults,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            defaults: IndicatorDefaults::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str::<Self>(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?
            .validated();

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Replace invalid indicator defaults with the built-in ones, keeping the
    /// rest of the configuration.
    pub fn validated(mut self) -> Self {
        if let Err(e) = self.defaults.validate() {
            warn!(
                error = %e,
                defaults = ?self.defaults,
                "Invalid indicator defaults, using built-in values"
            );
            self.defaults = IndicatorDefaults::default();
        }
        self
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5001");
        assert_eq!(cfg.defaults.rsi_period, 14);
        assert_eq!(cfg.defaults.macd_fast, 12);
        assert_eq!(cfg.defaults.macd_slow, 26);
        assert_eq!(cfg.defaults.macd_signal, 9);
        assert_eq!(cfg.defaults.bb_period, 20);
        assert!((cfg.defaults.bb_std_dev - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5001");
        assert_eq!(cfg.defaults.rsi_period, 14);
        assert_eq!(cfg.defaults.bb_period, 20);
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "bind_addr": "127.0.0.1:8080", "defaults": { "rsi_period": 7 } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert_eq!(cfg.defaults.rsi_period, 7);
        assert_eq!(cfg.defaults.macd_slow, 26);
        assert!((cfg.defaults.bb_std_dev - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_file_is_error() {
        let err = RuntimeConfig::load("/nonexistent/tradepro_config.json").unwrap_err();
        assert!(err.to_string().contains("failed to read runtime config"));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "tradepro_config_test_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{ "defaults": { "bb_period": 10, "bb_std_dev": 1.5 } }"#).unwrap();
        let cfg = RuntimeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.defaults.bb_period, 10);
        assert!((cfg.defaults.bb_std_dev - 1.5).abs() < f64::EPSILON);
        assert_eq!(cfg.bind_addr, "0.0.0.0:5001");
    }

    #[test]
    fn builtin_defaults_are_valid() {
        assert!(IndicatorDefaults::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_defaults() {
        let cases: [fn(&mut IndicatorDefaults); 7] = [
            |d| d.rsi_period = 0,
            |d| d.macd_fast = 0,
            |d| d.macd_signal = 0,
            |d| d.macd_fast = d.macd_slow,
            |d| d.bb_period = 1,
            |d| d.bb_std_dev = 0.0,
            |d| d.bb_std_dev = f64::NAN,
        ];
        for (i, mutate) in cases.iter().enumerate() {
            let mut defaults = IndicatorDefaults::default();
            mutate(&mut defaults);
            assert!(defaults.validate().is_err(), "case {i} accepted");
        }
    }

    #[test]
    fn validated_keeps_bind_addr_and_resets_defaults() {
        let mut cfg = RuntimeConfig::default();
        cfg.bind_addr = "127.0.0.1:9000".into();
        cfg.defaults.bb_period = 1;
        cfg.defaults.rsi_period = 7;
        let cfg = cfg.validated();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.defaults.bb_period, 20);
        assert_eq!(cfg.defaults.rsi_period, 14);
    }

    #[test]
    fn load_replaces_invalid_defaults() {
        let path = std::env::temp_dir().join(format!(
            "tradepro_config_invalid_{}.json",
            std::process::id()
        ));
        let json = r#"{ "bind_addr": "127.0.0.1:8081", "defaults": { "macd_fast": 30 } }"#;
        std::fs::write(&path, json).unwrap();
        let cfg = RuntimeConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:8081");
        assert_eq!(cfg.defaults.macd_fast, 12);
        assert_eq!(cfg.defaults.macd_slow, 26);
    }
}
