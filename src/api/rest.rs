// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/`. Each POST endpoint takes a JSON body with a
// `prices` array (oldest first) plus optional indicator parameters; omitted
// parameters fall back to the configured defaults.
//
// CORS is permissive so browser dashboards on any origin can call the API.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::analysis::{self, BollingerCurrent, MacdCurrent};
use crate::api::error::ApiError;
use crate::app_state::AppState;
use crate::indicators::{
    bollinger_bands, macd, rsi, BollingerResult, BollingerSettings, IndicatorSeries, MacdResult,
    MacdSettings,
};
use crate::types::{BandPosition, MacdTrend, RsiSignal};

const SERVICE_NAME: &str = "TradePro Technical Analysis API";

const RSI_DESCRIPTION: &str =
    "Relative Strength Index - above 70 is overbought, below 30 is oversold";
const MACD_DESCRIPTION: &str =
    "Moving Average Convergence Divergence - buy/sell signals on line crossovers";
const BOLLINGER_DESCRIPTION: &str =
    "Bollinger Bands - measure volatility, closes outside the bands hint at a reversal";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/rsi", post(rsi_endpoint))
        .route("/api/macd", post(macd_endpoint))
        .route("/api/bollinger", post(bollinger_endpoint))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Input validation
// =============================================================================

/// Convert raw JSON prices to floats. Numbers and numeric strings are
/// accepted; anything else (or a non-finite result) is rejected.
fn parse_prices(raw: Option<Vec<Value>>, required: usize) -> Result<Vec<f64>, ApiError> {
    let raw = match raw {
        Some(values) if !values.is_empty() => values,
        _ => return Err(ApiError::MissingPrices),
    };
    if raw.len() < required {
        return Err(ApiError::InsufficientPrices {
            got: raw.len(),
            required,
        });
    }

    raw.iter()
        .enumerate()
        .map(|(i, value)| {
            let price = match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            };
            price
                .filter(|p| p.is_finite())
                .ok_or(ApiError::InvalidPrice(i))
        })
        .collect()
}

/// Resolve an optional period against its default and lower bound.
fn period(
    name: &'static str,
    value: Option<i64>,
    default: usize,
    min: usize,
) -> Result<usize, ApiError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    usize::try_from(raw)
        .ok()
        .filter(|p| *p >= min)
        .ok_or_else(|| ApiError::InvalidPeriod {
            name,
            reason: format!("must be an integer of at least {min}, got {raw}"),
        })
}

fn macd_settings(
    state: &AppState,
    fast: Option<i64>,
    slow: Option<i64>,
    signal: Option<i64>,
) -> Result<MacdSettings, ApiError> {
    let defaults = state.defaults();
    let settings = MacdSettings {
        fast_period: period("fast_period", fast, defaults.macd_fast, 1)?,
        slow_period: period("slow_period", slow, defaults.macd_slow, 1)?,
        signal_period: period("signal_period", signal, defaults.macd_signal, 1)?,
    };
    if settings.fast_period >= settings.slow_period {
        return Err(ApiError::InvalidPeriod {
            name: "fast_period",
            reason: format!(
                "must be below slow_period ({} >= {})",
                settings.fast_period, settings.slow_period
            ),
        });
    }
    Ok(settings)
}

fn bollinger_settings(
    state: &AppState,
    bb_period: Option<i64>,
    std_dev: Option<f64>,
) -> Result<BollingerSettings, ApiError> {
    let defaults = state.defaults();
    let std_dev = std_dev.unwrap_or(defaults.bb_std_dev);
    if !(std_dev.is_finite() && std_dev > 0.0) {
        return Err(ApiError::InvalidMultiplier);
    }
    Ok(BollingerSettings {
        // A sample deviation needs at least two observations.
        period: period("period", bb_period, defaults.bb_period, 2)?,
        std_dev,
    })
}

// =============================================================================
// Health (public)
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    server_time: i64,
    uptime_secs: i64,
    requests_served: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        server_time: now.timestamp_millis(),
        uptime_secs: (now - state.started_at).num_seconds(),
        requests_served: state.requests_served(),
    })
}

// =============================================================================
// Combined analysis
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct IndicatorSelection {
    #[serde(default)]
    rsi: bool,
    #[serde(default)]
    macd: bool,
    #[serde(default)]
    bollinger: bool,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeSettings {
    rsi_period: Option<i64>,
    macd_fast: Option<i64>,
    macd_slow: Option<i64>,
    macd_signal: Option<i64>,
    bb_period: Option<i64>,
    bb_std_dev: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    prices: Option<Vec<Value>>,
    #[serde(default)]
    indicators: IndicatorSelection,
    #[serde(default)]
    settings: AnalyzeSettings,
}

#[derive(Serialize)]
struct RsiBlock {
    values: IndicatorSeries,
    period: usize,
    description: &'static str,
}

#[derive(Serialize)]
struct MacdBlock {
    #[serde(flatten)]
    result: MacdResult,
    description: &'static str,
}

#[derive(Serialize)]
struct BollingerBlock {
    #[serde(flatten)]
    result: BollingerResult,
    description: &'static str,
}

#[derive(Default, Serialize)]
struct IndicatorBlocks {
    #[serde(skip_serializing_if = "Option::is_none")]
    rsi: Option<RsiBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    macd: Option<MacdBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bollinger: Option<BollingerBlock>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    input_length: usize,
    indicators: IndicatorBlocks,
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(req) = payload?;
    let prices = parse_prices(req.prices, 2)?;
    let settings = &req.settings;
    let mut indicators = IndicatorBlocks::default();

    if req.indicators.rsi {
        let rsi_period = period(
            "rsi_period",
            settings.rsi_period,
            state.defaults().rsi_period,
            1,
        )?;
        indicators.rsi = Some(RsiBlock {
            values: rsi(&prices, rsi_period),
            period: rsi_period,
            description: RSI_DESCRIPTION,
        });
    }

    if req.indicators.macd {
        let macd_params = macd_settings(
            &state,
            settings.macd_fast,
            settings.macd_slow,
            settings.macd_signal,
        )?;
        indicators.macd = Some(MacdBlock {
            result: macd(&prices, macd_params),
            description: MACD_DESCRIPTION,
        });
    }

    if req.indicators.bollinger {
        let bb_params = bollinger_settings(&state, settings.bb_period, settings.bb_std_dev)?;
        indicators.bollinger = Some(BollingerBlock {
            result: bollinger_bands(&prices, bb_params),
            description: BOLLINGER_DESCRIPTION,
        });
    }

    let served = state.record_request();
    info!(points = prices.len(), served, "analysis complete");

    Ok(Json(AnalyzeResponse {
        input_length: prices.len(),
        indicators,
    }))
}

// =============================================================================
// RSI
// =============================================================================

#[derive(Debug, Deserialize)]
struct RsiRequest {
    prices: Option<Vec<Value>>,
    period: Option<i64>,
}

#[derive(Serialize)]
struct RsiResponse {
    rsi: IndicatorSeries,
    current_value: Option<f64>,
    signal: RsiSignal,
    period: usize,
}

async fn rsi_endpoint(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RsiRequest>, JsonRejection>,
) -> Result<Json<RsiResponse>, ApiError> {
    let Json(req) = payload?;
    let prices = parse_prices(req.prices, 1)?;
    let rsi_period = period("period", req.period, state.defaults().rsi_period, 1)?;

    let values = rsi(&prices, rsi_period);
    let current_value = analysis::current_rsi(&values);
    let signal = analysis::classify_rsi(current_value);

    state.record_request();
    info!(points = prices.len(), period = rsi_period, %signal, "rsi computed");

    Ok(Json(RsiResponse {
        rsi: values,
        current_value,
        signal,
        period: rsi_period,
    }))
}

// =============================================================================
// MACD
// =============================================================================

#[derive(Debug, Deserialize)]
struct MacdRequest {
    prices: Option<Vec<Value>>,
    fast_period: Option<i64>,
    slow_period: Option<i64>,
    signal_period: Option<i64>,
}

#[derive(Serialize)]
struct MacdResponse {
    #[serde(flatten)]
    result: MacdResult,
    current: MacdCurrent,
    trend: MacdTrend,
}

async fn macd_endpoint(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MacdRequest>, JsonRejection>,
) -> Result<Json<MacdResponse>, ApiError> {
    let Json(req) = payload?;
    let prices = parse_prices(req.prices, 1)?;
    let settings = macd_settings(&state, req.fast_period, req.slow_period, req.signal_period)?;

    let result = macd(&prices, settings);
    let current = analysis::current_macd(&result);
    let trend = analysis::macd_trend(&current);

    state.record_request();
    info!(points = prices.len(), %trend, "macd computed");

    Ok(Json(MacdResponse {
        result,
        current,
        trend,
    }))
}

// =============================================================================
// Bollinger Bands
// =============================================================================

#[derive(Debug, Deserialize)]
struct BollingerRequest {
    prices: Option<Vec<Value>>,
    period: Option<i64>,
    std_dev: Option<f64>,
}

#[derive(Serialize)]
struct BollingerResponse {
    #[serde(flatten)]
    result: BollingerResult,
    current: BollingerCurrent,
    position: BandPosition,
    bandwidth_percent: Option<f64>,
}

async fn bollinger_endpoint(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BollingerRequest>, JsonRejection>,
) -> Result<Json<BollingerResponse>, ApiError> {
    let Json(req) = payload?;
    let prices = parse_prices(req.prices, 1)?;
    let settings = bollinger_settings(&state, req.period, req.std_dev)?;

    let result = bollinger_bands(&prices, settings);
    let current = analysis::current_bollinger(&prices, &result);
    let position = analysis::band_position(&current);
    let bandwidth_percent = analysis::bandwidth_percent(&current);

    state.record_request();
    info!(points = prices.len(), %position, "bollinger computed");

    Ok(Json(BollingerResponse {
        result,
        current,
        position,
        bandwidth_percent,
    }))
}

// =============================================================================
// Tests
// =============================================================================
