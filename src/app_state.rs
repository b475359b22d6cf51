// =============================================================================
// Application State — shared across HTTP handlers
// =============================================================================
//
// Configuration is immutable once the server starts. The only mutable piece is
// a lock-free request counter reported by the health endpoint.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::runtime_config::{IndicatorDefaults, RuntimeConfig};

/// Central application state shared across all handlers via `Arc<AppState>`.
pub struct AppState {
    pub runtime_config: RuntimeConfig,

    /// Number of analysis requests that produced a result.
    requests_served: AtomicU64,

    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(runtime_config: RuntimeConfig) -> Self {
        Self {
            runtime_config: runtime_config.validated(),
            requests_served: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    pub fn defaults(&self) -> &IndicatorDefaults {
        &self.runtime_config.defaults
    }

    /// Record one successful analysis and return the new total.
    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }
}
