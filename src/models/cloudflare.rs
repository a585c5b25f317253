//! Cloudflare API data models
//!
//! Request and response shapes for the v4 REST endpoints the CLI talks to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response envelope shared by every Cloudflare v4 endpoint
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    #[serde(default)]
    pub success: bool,
    /// Structured errors, empty on success
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    /// Payload
    pub result: Option<T>,
}

/// A single structured error reported by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub code: i64,
    pub message: String,
}

/// Account identity as seen through a membership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Association between the current token and an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub account: AccountRef,
}

/// Domain registered through Cloudflare Registrar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrarDomain {
    pub name: String,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub privacy: bool,
}

impl fmt::Display for RegistrarDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  auto_renew={}  locked={}  privacy={}",
            self.name, self.auto_renew, self.locked, self.privacy
        )
    }
}

/// DNS zone hosted in the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: String,
}

impl Zone {
    /// Whether the zone's nameservers are already delegated to Cloudflare
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  status={}  id={}", self.name, self.status, self.id)
    }
}

/// Account reference inside a zone creation body
#[derive(Debug, Clone, Serialize)]
pub struct AccountId {
    pub id: String,
}

/// Body of `POST /zones`
#[derive(Debug, Clone, Serialize)]
pub struct NewZone {
    pub account: AccountId,
    pub jump_start: bool,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
}

impl NewZone {
    /// Full-setup zone with DNS record scanning enabled
    pub fn full(account_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            account: AccountId { id: account_id.into() },
            jump_start: true,
            name: name.into(),
            zone_type: "full".to_string(),
        }
    }
}

/// DNS record as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -> {} (id={})",
            self.record_type, self.name, self.content, self.id
        )
    }
}

/// Body of `POST /zones/{id}/dns_records`, plus the zone it targets
#[derive(Debug, Clone, Serialize)]
pub struct NewDnsRecord {
    /// Zone name, used to look up the zone id; not sent
    #[serde(skip)]
    pub zone: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    /// 1 means automatic
    pub ttl: u32,
    pub proxied: bool,
}
