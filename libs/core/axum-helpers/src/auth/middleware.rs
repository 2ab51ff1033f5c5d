use super::BasicAuthConfig;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use serde_json::json;

/// Basic Auth gate middleware.
///
/// Checks the transmitted credential pair against the process-wide shared
/// secret before any endpoint logic runs and before the target resource's
/// body is parsed.
///
/// Status mapping (observable contract, kept as-is):
/// - no `Authorization: Basic` header: 500 "No authorization key"
/// - header present but pair mismatched: 401 "Not authorized"
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum_helpers::{BasicAuthConfig, basic_auth_middleware};
///
/// let config = BasicAuthConfig::new("gatekeeper", "sesame42");
///
/// let gated = Router::new()
///     .route("/users", get(list_users))
///     .layer(axum::middleware::from_fn_with_state(
///         config,
///         basic_auth_middleware,
///     ));
/// ```
pub async fn basic_auth_middleware(
    State(config): State<BasicAuthConfig>,
    auth: Option<TypedHeader<Authorization<Basic>>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(credentials)) = auth else {
        tracing::debug!("Request without Basic Auth credentials rejected");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": {
                    "type": "missing_credentials",
                    "message": "No authorization key"
                }
            })),
        )
            .into_response();
    };

    if credentials.username() != config.username || credentials.password() != config.password {
        tracing::debug!("Basic Auth credential mismatch");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": {
                    "type": "unauthorized",
                    "message": "Not authorized"
                }
            })),
        )
            .into_response();
    }

    next.run(request).await
}
