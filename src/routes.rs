//! Router assembly and the generated OpenAPI document.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, AppState};
use crate::models::{
    CreditProfile, RegisterUserRequest, ScoreRequest, ScoreResult, User, UserDetail,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Credit Risk Assessment API",
        description = "Explainable digital trust scoring for informal and gig workers"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::register,
        handlers::list_users,
        handlers::get_user,
        handlers::calculate_score
    ),
    components(schemas(
        RegisterUserRequest,
        ScoreRequest,
        User,
        ScoreResult,
        CreditProfile,
        UserDetail
    )),
    tags(
        (name = "Root"),
        (name = "Health"),
        (name = "Registration"),
        (name = "Users"),
        (name = "Credit Score")
    )
)]
pub struct ApiDoc;

/// The scoring API endpoints, without state or middleware.
///
/// The `/users/...` and `/credit/...` paths are prefixed aliases of the
/// top-level endpoints.
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/register", post(handlers::register))
        .route("/calculate-score", post(handlers::calculate_score))
        .route("/users", get(handlers::list_users))
        .route("/user/:user_id", get(handlers::get_user))
        .route("/users/register", post(handlers::register))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/credit/calculate-score", post(handlers::calculate_score))
}

/// Builds the full application around `api`.
///
/// Adds `/health` and the Swagger UI outside of `api`, so layers the caller
/// put on `api` (rate limiting) do not apply to them.
pub fn build_app(state: Arc<AppState>, api: Router<Arc<AppState>>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
