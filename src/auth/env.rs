//! Environment lookup
//!
//! Credential variables are read through [`EnvSource`] so callers can supply
//! their own environment instead of the process one.

/// Primary token variable
pub const CF_API_TOKEN: &str = "CF_API_TOKEN";
/// Alias token variable
pub const CLOUDFLARE_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
/// Primary account id variable
pub const CF_ACCOUNT_ID: &str = "CF_ACCOUNT_ID";
/// Alias account id variable
pub const CLOUDFLARE_ACCOUNT_ID: &str = "CLOUDFLARE_ACCOUNT_ID";

/// Token variables in priority order
pub const TOKEN_VARS: [&str; 2] = [CF_API_TOKEN, CLOUDFLARE_API_TOKEN];
/// Account id variables in priority order
pub const ACCOUNT_ID_VARS: [&str; 2] = [CF_ACCOUNT_ID, CLOUDFLARE_ACCOUNT_ID];

/// Read access to environment variables
pub trait EnvSource: Send + Sync {
    /// Raw value of `key`, `None` when unset
    fn var(&self, key: &str) -> Option<String>;

    /// First variable in `keys` whose trimmed value is non-empty
    fn first_non_empty(&self, keys: &[&str]) -> Option<(String, String)> {
        keys.iter().find_map(|key| {
            self.var(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v))
        })
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for MapEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_first_non_empty_respects_order() {
        let env = MapEnv(HashMap::from([
            (CF_API_TOKEN, "primary"),
            (CLOUDFLARE_API_TOKEN, "alias"),
        ]));
        assert_eq!(
            env.first_non_empty(&TOKEN_VARS),
            Some((CF_API_TOKEN.to_string(), "primary".to_string()))
        );
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let env = MapEnv(HashMap::from([
            (CF_API_TOKEN, "   "),
            (CLOUDFLARE_API_TOKEN, " alias \n"),
        ]));
        assert_eq!(
            env.first_non_empty(&TOKEN_VARS),
            Some((CLOUDFLARE_API_TOKEN.to_string(), "alias".to_string()))
        );
        assert_eq!(env.first_non_empty(&ACCOUNT_ID_VARS), None);
    }
}
