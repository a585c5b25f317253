//! Onboarding service
//!
//! Ties the API client to the per-run credentials. Every command and the
//! wizard go through [`OnboardingService`].

use super::client::CloudflareClient;
use crate::auth::{
    CommandRunner, CredentialResolver, EnvSource, ProcessEnv, SystemCommandRunner,
    ZonePermissionExplainer,
};
use crate::config::Settings;
use crate::models::cloudflare::*;
use crate::utils::error::{helpers::validation_error, AppError, AppResult};
use std::sync::Arc;
use tracing::{debug, info};

/// API error code for "zone already exists"
pub const ZONE_ALREADY_EXISTS: i64 = 1061;

const MISSING_DNS_FLAGS: &str =
    "missing required flags for dns add: --zone --type --name --content";

/// Result of asking for a zone to be added
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneOutcome {
    Created(Zone),
    AlreadyExists(Zone),
}

impl ZoneOutcome {
    pub fn zone(&self) -> &Zone {
        match self {
            ZoneOutcome::Created(zone) | ZoneOutcome::AlreadyExists(zone) => zone,
        }
    }
}

/// Cloudflare operations for one command invocation
#[derive(Debug)]
pub struct OnboardingService {
    client: CloudflareClient,
    credentials: CredentialResolver,
    explainer: ZonePermissionExplainer,
}

impl OnboardingService {
    /// Build a service with explicit environment and command seams
    pub fn new(
        settings: &Settings,
        env: Arc<dyn EnvSource>,
        runner: Arc<dyn CommandRunner>,
    ) -> AppResult<Self> {
        Ok(Self {
            client: CloudflareClient::new(settings)?,
            credentials: CredentialResolver::new(env.clone(), runner.clone(), &settings.auth.tool),
            explainer: ZonePermissionExplainer::new(env, runner, &settings.auth.tool),
        })
    }

    /// Build a service over the real process environment and subprocesses
    pub fn from_system(settings: &Settings) -> AppResult<Self> {
        Self::new(settings, Arc::new(ProcessEnv), Arc::new(SystemCommandRunner))
    }

    async fn token(&mut self) -> AppResult<String> {
        self.credentials.resolve_token().await
    }

    async fn account_id(&mut self) -> AppResult<String> {
        self.credentials.resolve_account_id(&self.client).await
    }

    /// Domains registered through Cloudflare Registrar
    pub async fn list_registrar_domains(&mut self) -> AppResult<Vec<RegistrarDomain>> {
        let account_id = self.account_id().await?;
        let token = self.token().await?;
        self.client.list_registrar_domains(&token, &account_id).await
    }

    /// Zones in the account (first page)
    pub async fn list_zones(&mut self) -> AppResult<Vec<Zone>> {
        let account_id = self.account_id().await?;
        let token = self.token().await?;
        self.client.list_zones(&token, &account_id).await
    }

    /// Zone with the given name, if present
    pub async fn find_zone(&mut self, name: &str) -> AppResult<Option<Zone>> {
        let account_id = self.account_id().await?;
        let token = self.token().await?;
        self.client.find_zone(&token, &account_id, name).await
    }

    /// Add a full-setup zone, tolerating one that already exists
    ///
    /// Permission failures come back as
    /// [`AppError::ZoneCreatePermission`] with auth-mode guidance.
    pub async fn add_zone(&mut self, domain: &str) -> AppResult<ZoneOutcome> {
        let account_id = self.account_id().await?;
        let token = self.token().await?;

        let err = match self
            .client
            .create_zone(&token, &NewZone::full(&account_id, domain))
            .await
        {
            Ok(zone) => {
                info!("Created zone {} ({})", zone.name, zone.id);
                return Ok(ZoneOutcome::Created(zone));
            }
            Err(e) => e,
        };

        if err.has_api_code(ZONE_ALREADY_EXISTS) {
            debug!("Zone {} already exists, looking it up", domain);
            if let Some(existing) = self.find_zone(domain).await? {
                return Ok(ZoneOutcome::AlreadyExists(existing));
            }
        }

        Err(self.explainer.explain(err).await)
    }

    /// Create a DNS record in the zone named by `record.zone`
    ///
    /// Zone, type, name and content must be non-blank; this is checked
    /// before any API call.
    pub async fn add_dns_record(&mut self, record: &NewDnsRecord) -> AppResult<DnsRecord> {
        let required = [&record.zone, &record.record_type, &record.name, &record.content];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(validation_error(MISSING_DNS_FLAGS));
        }

        let zone = self
            .find_zone(&record.zone)
            .await?
            .ok_or_else(|| AppError::ZoneNotFound(record.zone.clone()))?;
        let token = self.token().await?;

        let created = self
            .client
            .create_dns_record(&token, &zone.id, record)
            .await?;
        info!(
            "Created {} record {} in zone {}",
            created.record_type, created.name, zone.id
        );
        Ok(created)
    }
}
