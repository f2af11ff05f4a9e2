//! Configuration errors
//!
//! The simulation itself never fails; only loading tuning/settings can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level table is empty")]
    EmptyLevelTable,
    #[error("level {level} has a coin quota of zero")]
    ZeroCoinQuota { level: u32 },
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: f32 },
    #[error("viewport height {height} leaves no room above the ground (minimum {min})")]
    ViewportTooShort { height: f32, min: f32 },
}
