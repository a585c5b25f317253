//! Cloudflare onboarding library
//!
//! Credential resolution, the Cloudflare API client and the command layer
//! behind the `cf` binary

pub mod auth;
pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use auth::{AuthMode, CredentialResolver, ZonePermissionExplainer};
pub use config::Settings;
pub use services::{CloudflareClient, OnboardingService, ZoneOutcome};
pub use utils::error::{AppError, AppResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
