//! REST API Handlers
//!
//! Implements the HTTP/JSON endpoints for client registration and the
//! join-room command log.

use crate::domain::ports::RowId;
use crate::error::Error;
use crate::registry::RegistryService;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Client removal request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveClientRequest {
    #[serde(default)]
    pub key: Option<String>,
}

/// Join-room command request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    /// Key of the issuing client, if any
    #[serde(default)]
    pub client_key: Option<String>,
}

/// Newly registered client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddClientResponse {
    pub index: RowId,
    pub key: String,
}

/// Client removal confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveClientResponse {
    pub success: bool,
    pub message: String,
}

/// Join-room submission confirmation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub success: bool,
    #[serde(rename = "commandID")]
    pub command_id: RowId,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

// =============================================================================
// REST Router
// =============================================================================

/// REST API router builder
pub struct RestRouter {
    registry: RegistryService,
}

impl RestRouter {
    /// Create a new REST router
    pub fn new(registry: RegistryService) -> Self {
        Self { registry }
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        let state = AppState {
            registry: self.registry,
        };

        Router::new()
            // Client endpoints
            .route("/addclient", post(add_client))
            .route("/clients", get(list_clients))
            .route("/removeclient", post(remove_client))
            // Command endpoints
            .route("/joinroom", post(join_room))
            .route("/commands", get(latest_command))
            // Health endpoint
            .route("/health", get(health_check))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
            .with_state(state)
    }
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    registry: RegistryService,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a client
async fn add_client(State(state): State<AppState>) -> Response {
    match state.registry.add_client().await {
        Ok(client) => (
            StatusCode::OK,
            Json(AddClientResponse {
                index: client.id,
                key: client.key,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// List all clients
async fn list_clients(State(state): State<AppState>) -> Response {
    match state.registry.list_clients().await {
        Ok(clients) => (StatusCode::OK, Json(clients)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Remove a client and its commands
async fn remove_client(
    State(state): State<AppState>,
    body: Result<Json<RemoveClientRequest>, JsonRejection>,
) -> Response {
    let request = body_or_default(body);

    match state.registry.remove_client(request.key.as_deref()).await {
        Ok(key) => (
            StatusCode::OK,
            Json(RemoveClientResponse {
                success: true,
                message: format!("client with key {} removed", key),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Submit a join-room command
async fn join_room(
    State(state): State<AppState>,
    body: Result<Json<JoinRoomRequest>, JsonRejection>,
) -> Response {
    let request = body_or_default(body);

    let result = state
        .registry
        .submit_join_room(
            request.room.as_deref(),
            request.target.as_deref(),
            request.client_key.as_deref(),
        )
        .await;

    match result {
        Ok(command_id) => (
            StatusCode::OK,
            Json(JoinRoomResponse {
                success: true,
                command_id,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Most recent command, or `{}` when the log is empty
async fn latest_command(State(state): State<AppState>) -> Response {
    match state.registry.latest_command().await {
        Ok(Some(command)) => (StatusCode::OK, Json(command)).into_response(),
        Ok(None) => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
        Err(e) => error_response(e),
    }
}

/// Health check
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// =============================================================================
// Utility Functions
// =============================================================================

/// A body that is missing or malformed counts as one with no fields set
fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unusable request body: {}", rejection.body_text());
            T::default()
        }
    }
}

/// Render an error as `{ "error": message }` with its status code
fn error_response(err: Error) -> Response {
    if err.is_caller_error() {
        warn!("Request rejected: {}", err);
    } else {
        error!("Request failed: {}", err);
    }

    (
        err.status_code(),
        Json(ApiErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
