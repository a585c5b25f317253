//! Credential resolution
//!
//! Finds the API token and account id for the current run. Each value is
//! looked up once, in priority order, and then reused for every later call
//! on the same [`CredentialResolver`].

use super::env::{EnvSource, ACCOUNT_ID_VARS, TOKEN_VARS};
use super::runner::CommandRunner;
use crate::models::cloudflare::{AccountRef, Membership};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Lists the accounts a token is a member of
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    async fn memberships(&self, token: &str) -> AppResult<Vec<Membership>>;
}

/// Output of `<auth tool> auth token --json`
#[derive(Debug, Deserialize)]
struct AuthToolToken {
    #[serde(default)]
    token: String,
}

/// Per-run credential cache
pub struct CredentialResolver {
    env: Arc<dyn EnvSource>,
    runner: Arc<dyn CommandRunner>,
    auth_tool: String,
    api_token: Option<String>,
    account_id: Option<String>,
}

impl CredentialResolver {
    /// Create a resolver with an empty cache
    pub fn new(
        env: Arc<dyn EnvSource>,
        runner: Arc<dyn CommandRunner>,
        auth_tool: impl Into<String>,
    ) -> Self {
        Self {
            env,
            runner,
            auth_tool: auth_tool.into(),
            api_token: None,
            account_id: None,
        }
    }

    /// Resolve the API token
    ///
    /// Priority:
    /// 1. `CF_API_TOKEN`
    /// 2. `CLOUDFLARE_API_TOKEN`
    /// 3. `<auth tool> auth token --json`
    pub async fn resolve_token(&mut self) -> AppResult<String> {
        if let Some(token) = &self.api_token {
            return Ok(token.clone());
        }

        if let Some((var, token)) = self.env.first_non_empty(&TOKEN_VARS) {
            info!("Using API token from {}", var);
            self.api_token = Some(token.clone());
            return Ok(token);
        }

        match self.token_from_auth_tool().await {
            Ok(token) => {
                info!("Using API token from {}", self.auth_tool);
                self.api_token = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                debug!("{} token fallback unavailable: {}", self.auth_tool, e);
                Err(AppError::MissingCredential)
            }
        }
    }

    /// Resolve the account id
    ///
    /// Priority:
    /// 1. `CF_ACCOUNT_ID`
    /// 2. `CLOUDFLARE_ACCOUNT_ID`
    /// 3. the single account the token is a member of
    pub async fn resolve_account_id(
        &mut self,
        lookup: &dyn MembershipLookup,
    ) -> AppResult<String> {
        if let Some(account_id) = &self.account_id {
            return Ok(account_id.clone());
        }

        if let Some((var, account_id)) = self.env.first_non_empty(&ACCOUNT_ID_VARS) {
            info!("Using account id from {}", var);
            self.account_id = Some(account_id.clone());
            return Ok(account_id);
        }

        let token = self.resolve_token().await?;
        let memberships = lookup.memberships(&token).await?;
        let account_id = select_account(memberships)?;

        info!("Inferred account id {} from memberships", account_id);
        self.account_id = Some(account_id.clone());
        Ok(account_id)
    }

    async fn token_from_auth_tool(&self) -> AppResult<String> {
        let stdout = self
            .runner
            .run(&self.auth_tool, &["auth", "token", "--json"])
            .await?;
        let parsed: AuthToolToken = serde_json::from_slice(&stdout)?;

        let token = parsed.token.trim();
        if token.is_empty() {
            return Err(AppError::UnexpectedResponse(format!(
                "{} token output did not include token field",
                self.auth_tool
            )));
        }
        Ok(token.to_string())
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("auth_tool", &self.auth_tool)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Pick the account id from a membership list
pub fn select_account(mut memberships: Vec<Membership>) -> AppResult<String> {
    match memberships.len() {
        0 => Err(AppError::NoMemberships),
        1 => Ok(memberships.remove(0).account.id),
        _ => Err(AppError::AmbiguousAccount {
            candidates: memberships
                .into_iter()
                .map(|m| m.account)
                .collect::<Vec<AccountRef>>(),
        }),
    }
}
