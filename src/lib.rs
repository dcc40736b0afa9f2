pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod service;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use handlers::rest;
use service::ReplyService;

/// REST router with tracing, CORS for the browser frontend, and Swagger UI.
pub fn app(service: Arc<ReplyService>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(rest::health_check))
        .route("/api/email/generate", post(rest::generate_reply))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
