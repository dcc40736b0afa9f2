use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{dto::GenerateReplyRequest, error::ReplyError, service::ReplyService};

#[derive(OpenApi)]
#[openapi(
    paths(generate_reply, health_check),
    components(schemas(GenerateReplyRequest)),
    tags(
        (name = "email", description = "Email reply generation API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    post,
    path = "/api/email/generate",
    request_body = GenerateReplyRequest,
    responses(
        (status = 200, description = "Generated reply body", body = String, content_type = "text/plain"),
        (status = 400, description = "Email content is missing or blank"),
        (status = 502, description = "Generation API failed or returned an unusable response"),
        (status = 504, description = "Generation API timed out")
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn generate_reply(
    State(service): State<Arc<ReplyService>>,
    Json(payload): Json<GenerateReplyRequest>,
) -> Response {
    match service.generate_reply(payload).await {
        Ok(reply) => (StatusCode::OK, reply).into_response(),
        Err(e) => {
            tracing::error!("failed to generate reply: {e}");
            error_response(&e)
        }
    }
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = String, content_type = "text/plain")
    ),
    tag = "email"
)]
#[debug_handler]
pub async fn health_check() -> Response {
    (StatusCode::OK, "Hello from email reply service!").into_response()
}

fn error_response(e: &ReplyError) -> Response {
    match e {
        ReplyError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()).into_response(),
        ReplyError::Timeout(_) => {
            (StatusCode::GATEWAY_TIMEOUT, "Generation API timed out").into_response()
        }
        ReplyError::Network(_) | ReplyError::ClientBuild(_) => {
            (StatusCode::BAD_GATEWAY, "Failed to reach generation API").into_response()
        }
        ReplyError::Http { status, .. } => (
            StatusCode::BAD_GATEWAY,
            format!("Generation API error: {status}"),
        )
            .into_response(),
        ReplyError::ResponseParse(_) => (
            StatusCode::BAD_GATEWAY,
            "Generation API returned an unusable response",
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    #[test]
    fn maps_errors_to_status_codes() {
        let cases = [
            (
                ReplyError::Validation("emailContent must not be empty".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ReplyError::Timeout(Duration::from_secs(30)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                ReplyError::Http {
                    status: StatusCode::TOO_MANY_REQUESTS,
                    body: String::new(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (
                ReplyError::ResponseParse("response contained no candidates".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error_response(&error).status(), expected, "{error}");
        }
    }

    #[test]
    fn openapi_documents_generate_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/email/generate"));
    }
}
