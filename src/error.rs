//! Error types shared by the gateway, storage, and configuration layers.
//!
//! ERROR HANDLING
//! ==============
//! Every AJAX failure (bad status, transport, server-side rejection, garbage
//! body) collapses into `AjaxError`, whose `Display` text is exactly what the
//! user sees in the error notification.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Machine-readable code for an error variant.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

// =============================================================================
// AJAX
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AjaxError {
    #[error("{}", status_message(*status, status_text))]
    Status { status: u16, status_text: String },
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Rejected(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

fn status_message(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {status_text}")
    }
}

impl AjaxError {
    /// Application-level rejection, falling back to a generic message when the
    /// server did not supply one.
    pub fn rejected(message: Option<&str>) -> Self {
        match message.map(str::trim).filter(|m| !m.is_empty()) {
            Some(m) => Self::Rejected(m.to_owned()),
            None => Self::Rejected("Operation failed".to_owned()),
        }
    }

    /// HTTP status code for `Status` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl ErrorCode for AjaxError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Status { .. } => "E_HTTP_STATUS",
            Self::Transport(_) => "E_TRANSPORT",
            Self::Rejected(_) => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
        }
    }
}

// =============================================================================
// STORAGE
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage write failed: {0}")]
    Write(String),
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable => "E_STORE_UNAVAILABLE",
            Self::Encode(_) => "E_STORE_ENCODE",
            Self::Write(_) => "E_STORE_WRITE",
        }
    }
}

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid settings json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
