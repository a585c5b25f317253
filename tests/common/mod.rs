//! Shared test doubles for the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cf_onboard::auth::{CommandRunner, EnvSource};
use cf_onboard::config::settings::*;
use cf_onboard::{AppError, AppResult, Settings};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Environment backed by a map that tests can change between calls
#[derive(Default)]
pub struct FakeEnv(Mutex<HashMap<String, String>>);

impl FakeEnv {
    pub fn new(pairs: &[(&str, &str)]) -> Arc<Self> {
        let env = Self::default();
        for (key, value) in pairs {
            env.set(key, value);
        }
        Arc::new(env)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.0
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    pub fn remove(&self, key: &str) {
        self.0.lock().unwrap().remove(key);
    }
}

impl EnvSource for FakeEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }
}

/// Command runner answering from a script keyed by `program args...`
#[derive(Default)]
pub struct FakeRunner {
    script: HashMap<String, Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, command: &str, stdout: &str) -> Self {
        self.script.insert(command.to_string(), Ok(stdout.to_string()));
        self
    }

    pub fn fail(mut self, command: &str, detail: &str) -> Self {
        self.script.insert(command.to_string(), Err(detail.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, program: &str, args: &[&str]) -> AppResult<Vec<u8>> {
        let command = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(command.clone());

        match self.script.get(&command) {
            Some(Ok(stdout)) => Ok(stdout.as_bytes().to_vec()),
            Some(Err(detail)) => Err(AppError::CommandFailed {
                program: program.to_string(),
                detail: detail.clone(),
            }),
            None => Err(AppError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not installed", program),
            ))),
        }
    }
}

/// Settings pointing the client at `base_url`
pub fn test_settings(base_url: &str) -> Settings {
    Settings {
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout: 5,
        },
        auth: AuthConfig {
            tool: "wrangler".to_string(),
        },
        wizard: WizardConfig {
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
        },
        logging: LoggingConfig {
            level: "warn".to_string(),
            format: "text".to_string(),
        },
    }
}

/// Denial returned by `POST /zones` for a token without zone-create capability
pub fn zone_create_denial_body() -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "errors": [{
            "code": 0,
            "message": "Requires permission \"com.cloudflare.api.account.zone.create\" to create zones for the selected account"
        }],
        "messages": [],
        "result": null
    })
}
