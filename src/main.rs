//! cf: Cloudflare domain helper CLI
//!
//! Lists registrar domains and zones, adds zones and DNS records, and runs
//! the interactive onboarding wizard

use cf_onboard::cli::{self, Cli, Commands};
use cf_onboard::utils::logging::init_logging;
use cf_onboard::{AppResult, Settings};
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Some(command) = Cli::parse().command else {
        println!("{}", cli::usage());
        return ExitCode::SUCCESS;
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> AppResult<()> {
    let settings = Settings::new()?;

    init_logging(&settings.logging)?;
    debug!("Settings loaded: api={}", settings.api.base_url);

    cli::run(command, &settings).await.map_err(|e| {
        if e.should_log_details() {
            debug!(kind = e.kind(), "Command failed: {:?}", e);
        }
        e
    })
}
