// src/error.rs

use crate::io::sink::Channel;
use thiserror::Error;

/// Result alias used by the estimators, the sweep driver and the sinks.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A parameter is out of range or inconsistent with another one.
    /// Raised before any trial runs.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The output collaborator refused a row or a close.
    #[error("{channel} sink failure: {message}")]
    Sink { channel: Channel, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub fn sink(channel: Channel, message: impl Into<String>) -> Self {
        Self::Sink {
            channel,
            message: message.into(),
        }
    }
}

/// Fails with `InvalidParameter` unless the threshold is finite and non-negative.
pub fn ensure_threshold(name: &'static str, threshold: f64) -> SimResult<()> {
    if !(threshold.is_finite() && threshold >= 0.0) {
        return Err(SimError::invalid(
            name,
            format!("must be a finite non-negative number, got {threshold}"),
        ));
    }
    Ok(())
}

/// Fails with `InvalidParameter` when a trial count is zero.
pub fn ensure_trials(name: &'static str, trials: u32) -> SimResult<()> {
    if trials == 0 {
        return Err(SimError::invalid(name, "must be at least 1"));
    }
    Ok(())
}
