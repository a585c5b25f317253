//! Service layer module
//!
//! Contains the Cloudflare HTTP client and the onboarding operations built on it

pub mod client;
pub mod onboarding;

pub use client::CloudflareClient;
pub use onboarding::{OnboardingService, ZoneOutcome};
