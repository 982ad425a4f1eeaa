//! Error type shared by every client call and local check. Each error carries a
//! user-facing message plus a coarse [`ErrorKind`] so routes can branch on the
//! category without string matching.

use serde_json::Value;
use std::fmt;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// Machine-distinguishable error category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Local input checks; never reaches the network.
    Validation,
    /// The server rejected the session token (HTTP 401).
    Unauthenticated,
    /// The caller lacks access to the resource (HTTP 403).
    Unauthorized,
    NotFound,
    /// Fetch failures and timeouts. Not retried automatically.
    Network,
    Server,
    Decode,
    Config,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    Config(String),
    Validation(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Builds an HTTP error from a status and a raw response body. JSON bodies
    /// with a `message` (or `error`) field surface that field only.
    pub fn from_response(status: u16, body: &str) -> Self {
        AppError::Http {
            status,
            message: sanitize_body(&message_from_body(body)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) => ErrorKind::Config,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Network(_) | AppError::Timeout(_) => ErrorKind::Network,
            AppError::Parse(_) | AppError::Serialization(_) => ErrorKind::Decode,
            AppError::Http { status, .. } => match status {
                401 => ErrorKind::Unauthenticated,
                403 => ErrorKind::Unauthorized,
                404 => ErrorKind::NotFound,
                _ => ErrorKind::Server,
            },
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        self.kind() == ErrorKind::Unauthenticated
    }

    /// Returns the HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message without the category prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::Config(message)
            | AppError::Validation(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message)
            | AppError::Http { message, .. } => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Validation(message) => write!(formatter, "{message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

fn message_from_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map_or_else(|| body.to_string(), str::to_string),
        _ => body.to_string(),
    }
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
