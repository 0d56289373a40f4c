//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Message-board endpoints are mounted under `/api/v1`; system endpoints
//! sit at the root. [`build_app`] assembles the full application router
//! including the WebSocket endpoint and the HTTP middleware stack.

pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::{ErrorBody, ErrorResponse};
use crate::ws::handler::ws_handler;

/// OpenAPI description of the REST surface.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "deque-gateway",
        description = "Message board backed by persistent double-ended queues"
    ),
    paths(
        handlers::messages::hello,
        handlers::messages::save_message,
        handlers::messages::drain_messages,
        handlers::messages::count_messages,
        handlers::system::health_handler,
        handlers::system::storage_handler,
    ),
    components(schemas(
        dto::HelloResponse,
        dto::SaveMessageRequest,
        dto::SaveMessageResponse,
        dto::DrainMessagesResponse,
        dto::MessageCountResponse,
        dto::HealthResponse,
        dto::StorageInfoResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Messages", description = "Per-author message collections"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the application: REST routes, `/ws`, Swagger UI (with the
/// `swagger-ui` feature), tracing and CORS layers, bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let router = build_router().route("/ws", get(ws_handler));

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
