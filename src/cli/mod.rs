//! Command line interface
//!
//! Argument parsing and the handlers behind each subcommand

pub mod wizard;

use crate::config::Settings;
use crate::models::cloudflare::NewDnsRecord;
use crate::services::{OnboardingService, ZoneOutcome};
use crate::utils::error::AppResult;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use tracing::debug;
use wizard::{TerminalPrompter, Wizard};

const ENV_HELP: &str = "\
Required env vars:
  CF_API_TOKEN or CLOUDFLARE_API_TOKEN
  CF_ACCOUNT_ID or CLOUDFLARE_ACCOUNT_ID
  (or Wrangler login for token fallback)

Examples:
  CF_API_TOKEN=... CF_ACCOUNT_ID=... cf registrar list
  CF_API_TOKEN=... CF_ACCOUNT_ID=... cf wizard
  CF_API_TOKEN=... CF_ACCOUNT_ID=... cf dns add --zone example.com --type A --name @ --content 1.2.3.4 --proxied false";

/// cf: Cloudflare domain helper CLI
#[derive(Parser, Debug)]
#[command(name = "cf", version, about = "Cloudflare domain helper CLI", long_about = None)]
#[command(after_help = ENV_HELP)]
pub struct Cli {
    /// `None` when `cf` runs without a subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive onboarding: register, add zone, add records
    Wizard,

    /// Cloudflare Registrar domains
    #[command(subcommand)]
    Registrar(RegistrarCommand),

    /// DNS zones in the account
    #[command(subcommand)]
    Zones(ZonesCommand),

    /// DNS records
    #[command(subcommand)]
    Dns(DnsCommand),
}

#[derive(Subcommand, Debug)]
pub enum RegistrarCommand {
    /// List registrar domains
    List,
}

#[derive(Subcommand, Debug)]
pub enum ZonesCommand {
    /// List zones
    List,
    /// Add a zone for a domain
    Add {
        /// Domain to add, e.g. example.com
        domain: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DnsCommand {
    /// Create a DNS record
    Add(DnsAddArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DnsAddArgs {
    /// Zone name, e.g. example.com
    #[arg(long)]
    pub zone: String,

    /// Record type: A, AAAA, CNAME, TXT, ...
    #[arg(long = "type")]
    pub record_type: String,

    /// Record name, `@` for the apex
    #[arg(long)]
    pub name: String,

    /// Record content (IP address, hostname, text)
    #[arg(long)]
    pub content: String,

    /// TTL in seconds, 1 means automatic
    #[arg(long, default_value_t = 1)]
    pub ttl: u32,

    /// Proxy through Cloudflare (true/yes/1)
    #[arg(long, default_value = "false", action = ArgAction::Set, value_parser = parse_flag_bool)]
    pub proxied: bool,
}

impl DnsAddArgs {
    /// Request body for the record, trimmed, with the type in upper case
    pub fn to_record(&self) -> NewDnsRecord {
        NewDnsRecord {
            zone: self.zone.trim().to_string(),
            record_type: self.record_type.trim().to_uppercase(),
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
            ttl: self.ttl,
            proxied: self.proxied,
        }
    }
}

/// Lenient boolean: `true`, `yes` or `1` (any case) are true, anything else false
pub fn parse_flag_bool(value: &str) -> Result<bool, String> {
    let value = value.trim();
    Ok(value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes") || value == "1")
}

/// Full help text, printed when no subcommand is given
pub fn usage() -> String {
    Cli::command().render_long_help().to_string()
}

/// Execute one parsed command
pub async fn run(command: Commands, settings: &Settings) -> AppResult<()> {
    debug!("Running command: {:?}", command);
    let mut service = OnboardingService::from_system(settings)?;

    match command {
        Commands::Wizard => {
            let mut wizard = Wizard::new(
                &mut service,
                TerminalPrompter::default(),
                settings.wizard.dashboard_url.clone(),
            );
            wizard.run().await
        }
        Commands::Registrar(RegistrarCommand::List) => {
            list_registrar_domains(&mut service).await
        }
        Commands::Zones(ZonesCommand::List) => list_zones(&mut service).await,
        Commands::Zones(ZonesCommand::Add { domain }) => {
            let outcome = service.add_zone(&domain).await?;
            println!("{}", describe_zone_outcome(&outcome));
            Ok(())
        }
        Commands::Dns(DnsCommand::Add(args)) => {
            let record = service.add_dns_record(&args.to_record()).await?;
            println!("DNS record created: {}", record);
            Ok(())
        }
    }
}

async fn list_registrar_domains(service: &mut OnboardingService) -> AppResult<()> {
    let domains = service.list_registrar_domains().await?;
    if domains.is_empty() {
        println!("No registrar domains found in this account.");
        return Ok(());
    }
    for domain in &domains {
        println!("{}", domain);
    }
    Ok(())
}

async fn list_zones(service: &mut OnboardingService) -> AppResult<()> {
    let zones = service.list_zones().await?;
    if zones.is_empty() {
        println!("No zones found in this account.");
        return Ok(());
    }
    for zone in &zones {
        println!("{}", zone);
    }
    Ok(())
}

/// One-line summary of a zone creation attempt
pub fn describe_zone_outcome(outcome: &ZoneOutcome) -> String {
    let (label, zone) = match outcome {
        ZoneOutcome::Created(zone) => ("Zone created", zone),
        ZoneOutcome::AlreadyExists(zone) => ("Zone already exists", zone),
    };
    format!("{}: {} (id={}, status={})", label, zone.name, zone.id, zone.status)
}
