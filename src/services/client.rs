//! HTTP client service
//!
//! Encapsulates HTTP communication with the Cloudflare v4 API

use crate::auth::MembershipLookup;
use crate::config::Settings;
use crate::models::cloudflare::*;
use crate::utils::error::{helpers::unexpected_response, AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Zones listed per request; only the first page is read
pub const ZONES_PER_PAGE: u32 = 100;

/// Cloudflare API client
///
/// Stateless with respect to credentials: every call takes the token (and
/// account id where needed) from the caller.
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    client: Client,
    base_url: String,
}

impl CloudflareClient {
    /// Create a new client instance
    pub fn new(settings: &Settings) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.api.timeout))
            .user_agent(concat!("cf-onboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// API base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List domains held by Cloudflare Registrar
    pub async fn list_registrar_domains(
        &self,
        token: &str,
        account_id: &str,
    ) -> AppResult<Vec<RegistrarDomain>> {
        let path = format!("/accounts/{}/registrar/domains", account_id);
        let request = self.request(Method::GET, &path, token);
        self.execute(request, &path).await
    }

    /// List the first page of zones in the account
    pub async fn list_zones(&self, token: &str, account_id: &str) -> AppResult<Vec<Zone>> {
        let request = self
            .request(Method::GET, "/zones", token)
            .query(&[("account.id", account_id)])
            .query(&[("per_page", ZONES_PER_PAGE)]);
        self.execute(request, "/zones").await
    }

    /// Look a zone up by exact name
    pub async fn find_zone(
        &self,
        token: &str,
        account_id: &str,
        name: &str,
    ) -> AppResult<Option<Zone>> {
        let request = self
            .request(Method::GET, "/zones", token)
            .query(&[("account.id", account_id), ("name", name)])
            .query(&[("per_page", 1)]);
        let zones: Vec<Zone> = self.execute(request, "/zones").await?;
        Ok(zones.into_iter().next())
    }

    /// Create a zone
    pub async fn create_zone(&self, token: &str, zone: &NewZone) -> AppResult<Zone> {
        let request = self.request(Method::POST, "/zones", token).json(zone);
        self.execute(request, "/zones").await
    }

    /// Create a DNS record in the zone with the given id
    pub async fn create_dns_record(
        &self,
        token: &str,
        zone_id: &str,
        record: &NewDnsRecord,
    ) -> AppResult<DnsRecord> {
        let path = format!("/zones/{}/dns_records", zone_id);
        let request = self.request(Method::POST, &path, token).json(record);
        self.execute(request, &path).await
    }

    fn request(&self, method: Method, path: &str, token: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .header("Content-Type", "application/json")
    }

    /// Send a request and unwrap the response envelope
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> AppResult<T> {
        debug!("Cloudflare API request: {}", path);

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Cloudflare API response status: {}", status);

        let envelope: ApiResponse<T> = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) if status.is_client_error() || status.is_server_error() => {
                debug!("Undecodable error body ({}): {}", e, body);
                return Err(AppError::Api {
                    status: status.as_u16(),
                    errors: Vec::new(),
                });
            }
            Err(e) => {
                error!("Failed to parse Cloudflare response for {}: {}", path, e);
                return Err(e.into());
            }
        };

        if status.as_u16() >= 400 || !envelope.success {
            return Err(AppError::Api {
                status: status.as_u16(),
                errors: envelope.errors,
            });
        }

        envelope
            .result
            .ok_or_else(|| unexpected_response(format!("{} returned no result", path)))
    }
}

#[async_trait]
impl MembershipLookup for CloudflareClient {
    async fn memberships(&self, token: &str) -> AppResult<Vec<Membership>> {
        let request = self.request(Method::GET, "/memberships", token);
        self.execute(request, "/memberships").await
    }
}
