//! Live-path tests against a local stub of the Generative Language API.

mod helpers;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use bondkeeper::config::GeminiConfig;
use bondkeeper::llm::{FailureClass, GeminiClient};
use bondkeeper::suggest::{generate_suggestions, mock_suggestions, MockReason, SuggestionOutcome};
use helpers::{seed_contact, test_db};

/// Bind a stub API on an ephemeral port and return a client pointed at it.
async fn stub_client(router: Router) -> GeminiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = GeminiConfig {
        api_key: Some("test-key".into()),
        base_url: format!("http://{addr}"),
        request_timeout_secs: 5,
        use_mock: false,
    };
    GeminiClient::from_config(&config).unwrap().unwrap()
}

fn catalog_route() -> Router {
    Router::new().route(
        "/v1beta/models",
        get(|| async {
            Json(json!({
                "models": [
                    {"name": "models/gemini-2.5-flash"},
                    {"name": "models/other-model"}
                ]
            }))
        }),
    )
}

#[tokio::test]
async fn live_call_parses_structured_payload() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "old friend");

    let payload =
        json!({"short": "s", "neutral": "n", "warm": "w", "action": "a"}).to_string();
    let router = catalog_route().route(
        "/v1beta/models/{model}",
        post(move || async move {
            Json(json!({
                "candidates": [{"content": {"parts": [{"text": payload}]}}]
            }))
        }),
    );
    let client = stub_client(router).await;

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::Live { model, suggestions } => {
            assert_eq!(model, "models/gemini-2.5-flash");
            assert_eq!(suggestions.short, "s");
            assert_eq!(suggestions.action, "a");
        }
        other => panic!("expected live outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_output_surfaces_raw_text() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "");

    let router = catalog_route().route(
        "/v1beta/models/{model}",
        post(|| async {
            Json(json!({
                "candidates": [{"content": {"parts": [{"text": "Sure! Here are some ideas."}]}}]
            }))
        }),
    );
    let client = stub_client(router).await;

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::RawText { model, text } => {
            assert_eq!(model, "models/gemini-2.5-flash");
            assert_eq!(text, "Sure! Here are some ideas.");
        }
        other => panic!("expected raw text outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn quota_failure_falls_back_to_mock() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "");

    let router = catalog_route().route(
        "/v1beta/models/{model}",
        post(|| async {
            (StatusCode::TOO_MANY_REQUESTS, "quota exceeded for project").into_response()
        }),
    );
    let client = stub_client(router).await;

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::Mock { reason, suggestions } => {
            assert_eq!(reason, MockReason::RemoteFailure(FailureClass::Quota));
            assert_eq!(suggestions, mock_suggestions());
        }
        other => panic!("expected mock outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_falls_back_to_generic_mock() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "");

    let router = catalog_route().route(
        "/v1beta/models/{model}",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }),
    );
    let client = stub_client(router).await;

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::Mock { reason, .. } => {
            assert_eq!(reason, MockReason::RemoteFailure(FailureClass::Generic));
        }
        other => panic!("expected mock outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_catalog_degrades_to_mock_without_generation() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "");

    let router = Router::new().route(
        "/v1beta/models",
        get(|| async { Json(json!({"models": []})) }),
    );
    let client = stub_client(router).await;

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::Mock { reason, .. } => {
            assert_eq!(reason, MockReason::NoModelAvailable);
        }
        other => panic!("expected mock outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_catalog_degrades_to_mock() {
    let mut conn = test_db();
    let cid = seed_contact(&mut conn, "Ravi", "");

    let config = GeminiConfig {
        api_key: Some("test-key".into()),
        base_url: "http://127.0.0.1:1".into(),
        request_timeout_secs: 2,
        use_mock: false,
    };
    let client = GeminiClient::from_config(&config).unwrap().unwrap();

    let outcome = generate_suggestions(&conn, Some(&client), false, cid)
        .await
        .unwrap();
    match outcome {
        SuggestionOutcome::Mock { reason, .. } => {
            assert_eq!(reason, MockReason::NoModelAvailable);
        }
        other => panic!("expected mock outcome, got {other:?}"),
    }
}
