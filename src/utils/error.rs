//! Error handling module
//!
//! Defines error types and handling logic used in the project

use crate::auth::AuthMode;
use crate::models::cloudflare::{AccountRef, ApiErrorDetail};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// No token source produced a value
    #[error("missing API token. set CF_API_TOKEN (or CLOUDFLARE_API_TOKEN), or login via Wrangler")]
    MissingCredential,

    /// The token is not a member of any account
    #[error("no Cloudflare account memberships found for token")]
    NoMemberships,

    /// The token belongs to several accounts and none was chosen
    #[error("multiple accounts found; set CF_ACCOUNT_ID. available: {}", describe_candidates(.candidates))]
    AmbiguousAccount {
        candidates: Vec<AccountRef>,
    },

    /// Cloudflare API returned an error envelope or an error status
    #[error("{}", describe_api_errors(.status, .errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// Zone creation was denied and the active auth mode has been diagnosed
    #[error("{original}\n{guidance}")]
    ZoneCreatePermission {
        original: Box<AppError>,
        mode: AuthMode,
        guidance: String,
    },

    /// External command exited unsuccessfully
    #[error("command `{program}` failed: {detail}")]
    CommandFailed {
        program: String,
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// User input validation failed
    #[error("{0}")]
    Validation(String),

    /// No zone with the given name exists in the account
    #[error("zone not found for {0}. run: cf zones add {0}")]
    ZoneNotFound(String),

    /// Response decoded but did not carry the expected payload
    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),
}

impl AppError {
    /// Get error kind string, used as a structured logging field
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingCredential
            | AppError::NoMemberships
            | AppError::AmbiguousAccount { .. } => "credential_error",
            AppError::Api { .. } => "api_error",
            AppError::ZoneCreatePermission { .. } => "permission_error",
            AppError::CommandFailed { .. } => "command_error",
            AppError::Validation(_) | AppError::ZoneNotFound(_) => "invalid_request_error",
            AppError::Prompt(_) | AppError::Io(_) => "io_error",
            AppError::Config(_) => "config_error",
            AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::UnexpectedResponse(_) => "transport_error",
        }
    }

    /// Whether the Cloudflare API reported the given error code
    pub fn has_api_code(&self, code: i64) -> bool {
        match self {
            AppError::Api { errors, .. } => errors.iter().any(|e| e.code == code),
            AppError::ZoneCreatePermission { original, .. } => original.has_api_code(code),
            _ => false,
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(
            self,
            AppError::MissingCredential | AppError::Validation(_) | AppError::ZoneNotFound(_)
        )
    }
}

/// Render the flattened Cloudflare error list
fn describe_api_errors(status: &u16, errors: &[ApiErrorDetail]) -> String {
    if errors.is_empty() {
        return format!("Cloudflare API request failed (HTTP {})", status);
    }
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_candidates(candidates: &[AccountRef]) -> String {
    candidates
        .iter()
        .map(|c| format!("{} ({})", c.name, c.id))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create validation error
    pub fn validation_error(message: impl Into<String>) -> AppError {
        AppError::Validation(message.into())
    }

    /// Create prompt error
    pub fn prompt_error(message: impl Into<String>) -> AppError {
        AppError::Prompt(message.into())
    }

    /// Create unexpected response error
    pub fn unexpected_response(message: impl Into<String>) -> AppError {
        AppError::UnexpectedResponse(message.into())
    }
}

/// Error context extension trait
pub trait ErrorContext<T> {
    /// Add validation error context
    fn validation_context(self, message: &str) -> AppResult<T>;

    /// Add prompt error context
    fn prompt_context(self, message: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn validation_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Validation(format!("{}: {}", message, e)))
    }

    fn prompt_context(self, message: &str) -> AppResult<T> {
        self.map_err(|e| AppError::Prompt(format!("{}: {}", message, e)))
    }
}
