//! Browser dashboard — an axum server over the core operations.
//!
//! Serves a single embedded HTML page plus a small JSON API: list contacts
//! with previews, import a CSV log, and generate suggestions. Each request
//! opens its own SQLite connection; there is no pooling and no shared
//! mutable state between requests.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::BondConfig;
use crate::ingest::{import_csv, IngestError};
use crate::llm::GeminiClient;
use crate::store::contacts::list_contacts;
use crate::store::messages::{message_count, recent_messages};
use crate::store::types::Message;
use crate::store::StoreError;
use crate::suggest::generate_suggestions;

const INDEX_HTML: &str = include_str!("dashboard.html");

/// How many recent messages the contact list previews.
const PREVIEW_MESSAGES: usize = 2;

#[derive(Clone)]
struct AppState {
    config: Arc<BondConfig>,
}

/// Run the dashboard until ctrl-c.
pub async fn serve(config: BondConfig) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    // Create the database up front so the first page load has tables
    crate::db::open_database(config.resolved_db_path())?;

    let state = AppState {
        config: Arc::new(config),
    };

    let router = Router::new()
        .route("/", get(index))
        .route("/api/contacts", get(api_contacts))
        .route("/api/import", post(api_import))
        .route("/api/suggest/{contact_id}", post(api_suggest))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "dashboard listening at http://{bind_addr}/");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("failed to listen for ctrl-c");
            tracing::info!("shutting down dashboard");
        })
        .await?;

    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// A contact row as rendered by the dashboard.
#[derive(Debug, Serialize)]
struct ContactView {
    contact_id: i64,
    name: String,
    notes: String,
    message_count: i64,
    preview: Vec<Message>,
}

async fn api_contacts(State(state): State<AppState>) -> Result<Json<Vec<ContactView>>, ApiError> {
    let conn = crate::db::open_database(state.config.resolved_db_path())?;

    let mut views = Vec::new();
    for contact in list_contacts(&conn)? {
        let preview = recent_messages(&conn, contact.contact_id, PREVIEW_MESSAGES)?;
        let count = message_count(&conn, contact.contact_id)?;
        views.push(ContactView {
            contact_id: contact.contact_id,
            name: contact.name,
            notes: contact.notes,
            message_count: count,
            preview,
        });
    }
    Ok(Json(views))
}

#[derive(Debug, Deserialize)]
struct ImportParams {
    name: String,
}

async fn api_import(
    State(state): State<AppState>,
    Query(params): Query<ImportParams>,
    body: String,
) -> Result<Response, ApiError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Ok((StatusCode::BAD_REQUEST, "contact name must not be empty").into_response());
    }

    let mut conn = crate::db::open_database(state.config.resolved_db_path())?;
    let report = import_csv(&mut conn, body.as_bytes(), name)?;
    Ok(Json(report).into_response())
}

async fn api_suggest(
    State(state): State<AppState>,
    Path(contact_id): Path<i64>,
) -> Result<Response, ApiError> {
    let conn = crate::db::open_database(state.config.resolved_db_path())?;
    let client = GeminiClient::from_config(&state.config.gemini)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let use_mock = state.config.gemini.use_mock;

    // `generate_suggestions` borrows the non-Sync rusqlite connection across
    // its awaits, so its future is !Send; run it off the async workers.
    let handle = tokio::runtime::Handle::current();
    let outcome = tokio::task::spawn_blocking(move || {
        handle.block_on(generate_suggestions(
            &conn,
            client.as_ref(),
            use_mock,
            contact_id,
        ))
    })
    .await
    .map_err(|e| ApiError::internal(e.to_string()))??;

    Ok(Json(outcome).into_response())
}

/// Maps internal errors onto HTTP responses. Ingestion problems are the
/// caller's fault (400), a missing contact is 404, the rest is 500.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::internal(e.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::ContactNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Sqlite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl From<IngestError> for ApiError {
    fn from(e: IngestError) -> Self {
        let status = match e {
            IngestError::MissingColumn(_) | IngestError::Csv(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}
