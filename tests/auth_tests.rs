//! Credential resolution and permission diagnosis tests

mod common;

use cf_onboard::auth::{CredentialResolver, ZonePermissionExplainer};
use cf_onboard::models::cloudflare::ApiErrorDetail;
use cf_onboard::{AppError, AuthMode, CloudflareClient};
use common::{test_settings, FakeEnv, FakeRunner};
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

const WHOAMI: &str = "You are logged in with account example-account";

fn denial() -> AppError {
    AppError::Api {
        status: 403,
        errors: vec![ApiErrorDetail {
            code: 0,
            message: "Requires permission \"com.cloudflare.api.account.zone.create\" to create zones for the selected account".to_string(),
        }],
    }
}

#[tokio::test]
async fn test_unrelated_errors_are_returned_unchanged() {
    let runner = Arc::new(FakeRunner::new().respond("wrangler whoami", WHOAMI));
    let explainer = ZonePermissionExplainer::new(FakeEnv::new(&[]), runner.clone(), "wrangler");

    let original = AppError::Api {
        status: 400,
        errors: vec![ApiErrorDetail {
            code: 1000,
            message: "some other error".to_string(),
        }],
    };
    let rendered = original.to_string();
    let got = explainer.explain(original).await;

    assert!(matches!(got, AppError::Api { status: 400, .. }));
    assert_eq!(got.to_string(), rendered);

    let got = explainer.explain(AppError::MissingCredential).await;
    assert!(matches!(got, AppError::MissingCredential));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_denial_with_environment_token() {
    let env = FakeEnv::new(&[("CF_API_TOKEN", "test-token"), ("CLOUDFLARE_API_TOKEN", "")]);
    let runner = Arc::new(FakeRunner::new().respond("wrangler whoami", WHOAMI));
    let explainer = ZonePermissionExplainer::new(env, runner.clone(), "wrangler");

    let got = explainer.explain(denial()).await;
    let msg = got.to_string();

    assert!(matches!(
        got,
        AppError::ZoneCreatePermission { mode: AuthMode::EnvironmentToken, .. }
    ));
    assert!(msg.contains("Auth mode detected: API token from environment"), "{}", msg);
    assert!(msg.contains("Use a token with zone-creation capability"), "{}", msg);
    assert!(runner.calls().is_empty(), "runner must not be called in API token mode");
}

#[tokio::test]
async fn test_denial_with_wrangler_fallback() {
    let env = FakeEnv::new(&[("CF_API_TOKEN", ""), ("CLOUDFLARE_API_TOKEN", "")]);
    let runner = Arc::new(FakeRunner::new().respond("wrangler whoami", WHOAMI));
    let explainer = ZonePermissionExplainer::new(env, runner.clone(), "wrangler");

    let msg = explainer.explain(denial()).await.to_string();

    assert!(msg.contains("Auth mode detected: Wrangler token fallback"), "{}", msg);
    assert!(msg.contains(WHOAMI), "{}", msg);
    assert_eq!(runner.calls(), vec!["wrangler whoami".to_string()]);
}

#[tokio::test]
async fn test_diagnosis_reads_environment_fresh() {
    let env = FakeEnv::new(&[("CF_API_TOKEN", "tok")]);
    let runner = Arc::new(FakeRunner::new().respond("wrangler whoami", WHOAMI));

    let mut resolver = CredentialResolver::new(env.clone(), runner.clone(), "wrangler");
    assert_eq!(resolver.resolve_token().await.unwrap(), "tok");

    // resolver still holds the token, but the variable is gone now
    env.remove("CF_API_TOKEN");
    let explainer = ZonePermissionExplainer::new(env, runner, "wrangler");
    assert_eq!(explainer.detect_mode(), AuthMode::ExternalToolFallback);
    assert_eq!(resolver.resolve_token().await.unwrap(), "tok");
}

#[tokio::test]
async fn test_token_memoized_across_env_change() {
    let env = FakeEnv::new(&[("CF_API_TOKEN", "first")]);
    let runner = Arc::new(FakeRunner::new());
    let mut resolver = CredentialResolver::new(env.clone(), runner, "wrangler");

    assert_eq!(resolver.resolve_token().await.unwrap(), "first");
    env.set("CF_API_TOKEN", "second");
    assert_eq!(resolver.resolve_token().await.unwrap(), "first");
}

#[tokio::test]
async fn test_token_from_wrangler_when_env_empty() {
    let runner = Arc::new(
        FakeRunner::new().respond("wrangler auth token --json", r#"{"token":"tok-123"}"#),
    );
    let mut resolver = CredentialResolver::new(FakeEnv::new(&[]), runner.clone(), "wrangler");

    assert_eq!(resolver.resolve_token().await.unwrap(), "tok-123");
    assert_eq!(runner.calls(), vec!["wrangler auth token --json".to_string()]);
}

#[tokio::test]
async fn test_missing_token_when_every_source_fails() {
    let runner = Arc::new(FakeRunner::new().fail("wrangler auth token --json", "not logged in"));
    let mut resolver = CredentialResolver::new(FakeEnv::new(&[]), runner, "wrangler");

    let err = resolver.resolve_token().await.unwrap_err();
    assert!(matches!(err, AppError::MissingCredential));
    assert!(err.to_string().contains("CF_API_TOKEN"));
}

async fn memberships_server(result: serde_json::Value) -> (MockServer, CloudflareClient) {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/memberships")
                .header("Authorization", "Bearer tok");
            then.status(200).json_body(json!({
                "success": true,
                "errors": [],
                "messages": [],
                "result": result
            }));
        })
        .await;
    let client = CloudflareClient::new(&test_settings(&server.base_url())).unwrap();
    (server, client)
}

fn token_only_resolver() -> CredentialResolver {
    let env = FakeEnv::new(&[("CF_API_TOKEN", "tok")]);
    CredentialResolver::new(env, Arc::new(FakeRunner::new()), "wrangler")
}

#[tokio::test]
async fn test_account_inferred_from_single_membership() {
    let (_server, client) =
        memberships_server(json!([{"account": {"id": "acc-1", "name": "Only"}}])).await;

    let mut resolver = token_only_resolver();
    assert_eq!(resolver.resolve_account_id(&client).await.unwrap(), "acc-1");
}

#[tokio::test]
async fn test_account_inference_without_memberships() {
    let (_server, client) = memberships_server(json!([])).await;

    let err = token_only_resolver().resolve_account_id(&client).await.unwrap_err();
    assert!(matches!(err, AppError::NoMemberships));
    assert!(err.to_string().contains("no Cloudflare account memberships"));
}

#[tokio::test]
async fn test_account_inference_lists_every_candidate() {
    let (_server, client) = memberships_server(json!([
        {"account": {"id": "acc-1", "name": "Personal"}},
        {"account": {"id": "acc-2", "name": "Work"}}
    ]))
    .await;

    let err = token_only_resolver().resolve_account_id(&client).await.unwrap_err();
    let msg = err.to_string();
    for needle in ["Personal", "acc-1", "Work", "acc-2"] {
        assert!(msg.contains(needle), "{} missing from {}", needle, msg);
    }
}

#[tokio::test]
async fn test_account_env_override_skips_memberships() {
    let server = MockServer::start_async().await;
    let memberships = server
        .mock_async(|when, then| {
            when.method(GET).path("/memberships");
            then.status(500);
        })
        .await;
    let client = CloudflareClient::new(&test_settings(&server.base_url())).unwrap();

    let env = FakeEnv::new(&[("CLOUDFLARE_ACCOUNT_ID", "acc-env")]);
    let mut resolver = CredentialResolver::new(env, Arc::new(FakeRunner::new()), "wrangler");

    assert_eq!(resolver.resolve_account_id(&client).await.unwrap(), "acc-env");
    assert_eq!(memberships.hits_async().await, 0);
}
