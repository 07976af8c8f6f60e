use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

pub mod books;

/// Shared per-request state: the store handle, injected once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "OK"))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: book resource, health and API docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let books = Router::new()
        .route("/Books", get(books::list).post(books::create))
        .route(
            "/Books/:id",
            get(books::get).put(books::update).delete(books::delete),
        );

    Router::new()
        .merge(SwaggerUi::new("/docs").url(
            "/api-docs/openapi.json",
            crate::openapi::ApiDoc::openapi(),
        ))
        .route("/health", get(health))
        .merge(books)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
