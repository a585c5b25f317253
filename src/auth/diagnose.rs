//! Zone-creation permission diagnosis
//!
//! Cloudflare rejects `POST /zones` with a capability error when the token
//! cannot create zones. By the time the error reaches the caller it has been
//! flattened to text, so recognition is a substring match on the rendered
//! message. A recognised error is rewritten with the auth mode that was in
//! effect and what to do about it. Anything else is handed back untouched.

use super::env::{EnvSource, TOKEN_VARS};
use super::runner::CommandRunner;
use super::AuthMode;
use crate::utils::error::AppError;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Capability named in the API's refusal to create a zone
pub const ZONE_CREATE_CAPABILITY: &str = "com.cloudflare.api.account.zone.create";

/// Rewrites zone-creation permission failures into actionable errors
///
/// Reads the environment and the auth tool fresh on every call and never
/// touches a [`CredentialResolver`](super::CredentialResolver) cache.
pub struct ZonePermissionExplainer {
    env: Arc<dyn EnvSource>,
    runner: Arc<dyn CommandRunner>,
    auth_tool: String,
}

impl ZonePermissionExplainer {
    pub fn new(
        env: Arc<dyn EnvSource>,
        runner: Arc<dyn CommandRunner>,
        auth_tool: impl Into<String>,
    ) -> Self {
        Self {
            env,
            runner,
            auth_tool: auth_tool.into(),
        }
    }

    /// Whether `err` is the zone-creation capability refusal
    pub fn is_zone_create_denial(err: &AppError) -> bool {
        err.to_string().contains(ZONE_CREATE_CAPABILITY)
    }

    /// Auth mode as it stands right now
    pub fn detect_mode(&self) -> AuthMode {
        if self.env.first_non_empty(&TOKEN_VARS).is_some() {
            AuthMode::EnvironmentToken
        } else {
            AuthMode::ExternalToolFallback
        }
    }

    /// Explain a failed zone creation
    ///
    /// Returns `err` itself when it is not a capability refusal.
    pub async fn explain(&self, err: AppError) -> AppError {
        if !Self::is_zone_create_denial(&err) {
            return err;
        }

        let mode = self.detect_mode();
        debug!("Zone creation denied, auth mode {:?}", mode);

        let guidance = match mode {
            AuthMode::EnvironmentToken => format!(
                "Auth mode detected: API token from environment ({}).\n\
                 Next steps: Use a token with zone-creation capability. Edit the token's \
                 permissions in the Cloudflare dashboard to include \"{}\" (Zone: Edit) \
                 for this account, then export it as {}.",
                TOKEN_VARS.join(" or "),
                ZONE_CREATE_CAPABILITY,
                TOKEN_VARS[0],
            ),
            AuthMode::ExternalToolFallback => {
                let mut text = format!(
                    "Auth mode detected: Wrangler token fallback (neither {} is set).\n\
                     Next steps: run `{tool} login` with an account whose role can create zones, \
                     or set {} to an API token with zone-creation capability.",
                    TOKEN_VARS.join(" nor "),
                    TOKEN_VARS[0],
                    tool = self.auth_tool,
                );
                if let Some(identity) = self.whoami().await {
                    text.push_str(&format!("\n{} whoami:\n{}", self.auth_tool, identity));
                }
                text
            }
        };

        AppError::ZoneCreatePermission {
            original: Box::new(err),
            mode,
            guidance,
        }
    }

    async fn whoami(&self) -> Option<String> {
        match self.runner.run(&self.auth_tool, &["whoami"]).await {
            Ok(stdout) => {
                let identity = String::from_utf8_lossy(&stdout).trim().to_string();
                (!identity.is_empty()).then_some(identity)
            }
            Err(e) => {
                warn!("Could not query {} identity: {}", self.auth_tool, e);
                None
            }
        }
    }
}

impl fmt::Debug for ZonePermissionExplainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonePermissionExplainer")
            .field("auth_tool", &self.auth_tool)
            .finish_non_exhaustive()
    }
}
