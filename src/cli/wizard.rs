//! Interactive onboarding wizard
//!
//! Walks a user through registering a domain, adding it as a zone and
//! creating DNS records. All terminal interaction goes through [`Prompter`].

use super::describe_zone_outcome;
use crate::models::cloudflare::NewDnsRecord;
use crate::services::OnboardingService;
use crate::utils::error::{helpers::validation_error, AppResult, ErrorContext};
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing::debug;

/// Terminal interaction used by the wizard
pub trait Prompter {
    /// Ask for a line of text; an empty answer yields `default`
    fn input(&mut self, question: &str, default: &str) -> AppResult<String>;

    /// Ask a yes/no question
    fn confirm(&mut self, question: &str, default: bool) -> AppResult<bool>;

    /// Show a line of output
    fn say(&mut self, message: &str);

    /// Open `url` in the user's browser
    fn open_url(&mut self, url: &str) -> std::io::Result<()>;
}

/// [`Prompter`] backed by the real terminal and browser
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, question: &str, default: &str) -> AppResult<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true);
        if !default.is_empty() {
            input = input.default(default.to_string());
        }

        let answer = input.interact_text().prompt_context(question)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() { default } else { answer }.to_string())
    }

    fn confirm(&mut self, question: &str, default: bool) -> AppResult<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(question)
            .default(default)
            .interact()
            .prompt_context(question)
    }

    fn say(&mut self, message: &str) {
        println!("{}", message);
    }

    fn open_url(&mut self, url: &str) -> std::io::Result<()> {
        webbrowser::open(url)
    }
}

/// Onboarding wizard
pub struct Wizard<'a, P: Prompter> {
    service: &'a mut OnboardingService,
    prompter: P,
    dashboard_url: String,
}

impl<'a, P: Prompter> Wizard<'a, P> {
    pub fn new(service: &'a mut OnboardingService, prompter: P, dashboard_url: String) -> Self {
        Self {
            service,
            prompter,
            dashboard_url,
        }
    }

    /// Hand the prompter back, mainly so callers can inspect a transcript
    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Run the whole wizard
    pub async fn run(&mut self) -> AppResult<()> {
        let domain = self
            .prompter
            .input("Domain you want to onboard (example.com)", "")?;
        if domain.is_empty() {
            return Err(validation_error("domain is required"));
        }
        debug!("Wizard onboarding {}", domain);

        let registered = self
            .prompter
            .confirm("Is this domain already registered somewhere?", true)?;
        if !registered {
            self.manual_registration()?;
        }

        let add_zone = self
            .prompter
            .confirm(&format!("Add {} as a zone in Cloudflare now?", domain), true)?;
        if add_zone {
            let outcome = self.service.add_zone(&domain).await?;
            self.prompter.say(&describe_zone_outcome(&outcome));

            let zone = outcome.zone();
            if !zone.is_active() {
                self.prompter.say(&format!(
                    "Zone status is '{}'. You may still need to update nameservers at your current registrar.",
                    zone.status
                ));
            }
        }

        while self.prompter.confirm("Add a DNS record now?", true)? {
            let record = self.ask_record(&domain)?;
            let created = self.service.add_dns_record(&record).await?;
            self.prompter.say(&format!("DNS record created: {}", created));
        }

        self.prompter.say("\nWizard complete.");
        Ok(())
    }

    fn manual_registration(&mut self) -> AppResult<()> {
        self.prompter
            .say("\nManual step required: register domain in Cloudflare Dashboard:");
        self.prompter.say(&self.dashboard_url);

        if self
            .prompter
            .confirm("Open the dashboard URL in your browser now?", true)?
        {
            match self.prompter.open_url(&self.dashboard_url) {
                Ok(()) => self.prompter.say("Opened browser tab."),
                Err(e) => self
                    .prompter
                    .say(&format!("Could not open browser automatically: {}", e)),
            }
        }

        self.prompter.input(
            "Press Enter when registration is complete and you want to continue",
            "",
        )?;
        Ok(())
    }

    fn ask_record(&mut self, domain: &str) -> AppResult<NewDnsRecord> {
        let zone = self.prompter.input("Zone name", domain)?;
        let record_type = self.prompter.input("Record type", "A")?;
        let name = self.prompter.input("Record name", "@")?;
        let content = self.prompter.input("Record content (IP or hostname)", "")?;
        let ttl = self
            .prompter
            .input("TTL (1 means auto)", "1")?
            .parse::<u32>()
            .validation_context("invalid TTL")?;
        let proxied = self
            .prompter
            .confirm("Proxied through Cloudflare (orange cloud)?", false)?;

        Ok(NewDnsRecord {
            zone,
            record_type: record_type.to_uppercase(),
            name,
            content,
            ttl,
            proxied,
        })
    }
}
