//! Authentication module
//!
//! Credential resolution for outbound API calls and diagnosis of
//! permission failures.

pub mod diagnose;
pub mod env;
pub mod resolver;
pub mod runner;

pub use diagnose::{ZonePermissionExplainer, ZONE_CREATE_CAPABILITY};
pub use env::{EnvSource, ProcessEnv};
pub use resolver::{CredentialResolver, MembershipLookup};
pub use runner::{CommandRunner, SystemCommandRunner};

/// Which source supplied the active API token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// `CF_API_TOKEN` or `CLOUDFLARE_API_TOKEN`
    EnvironmentToken,
    /// Token obtained from the external auth tool
    ExternalToolFallback,
}
