use crate::config::ServerConfig;
use crate::errors::AppError;
use crate::models::*;
use crate::scoring::{calculate_digital_trust_score, generate_recommendations};
use crate::store::MemoryStore;
use crate::validation::{parse_user_id, validate_registration, validate_score_request};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: ServerConfig,
    /// User and credit profile storage.
    pub store: MemoryStore,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            store: MemoryStore::new(),
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// API root endpoint.
///
/// Returns the service banner and a map of the public endpoints.
#[utoipa::path(get, path = "/", tag = "Root", responses((status = 200, description = "Service banner")))]
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Credit Risk Assessment API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "register": "POST /register",
            "calculate_score": "POST /calculate-score",
            "get_users": "GET /users",
            "get_user_detail": "GET /user/{id}"
        }
    }))
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
#[utoipa::path(get, path = "/health", tag = "Health", responses((status = 200, description = "Service is healthy")))]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let users = state.store.list_users().await.len();
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-credit-portal",
            "version": env!("CARGO_PKG_VERSION"),
            "users": users
        })),
    )
}

/// POST /register
///
/// Registers a new user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body with name, email, job type and months active.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<User>), AppError>` - 201 with the created user, 400 for
///   a duplicate email, 422 for an invalid payload.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Registration",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let request = json_body(payload)?;
    let new_user = validate_registration(&request)?;

    let user = state.store.insert_user(new_user).await?;
    tracing::info!("✓ Registered user {} ({})", user.id, user.job_type);

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
///
/// Lists all registered users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    Json(state.store.list_users().await)
}

/// GET /user/{user_id}
///
/// Returns the user with their latest credit profile, or `null` in its place
/// when the user has never been scored.
#[utoipa::path(
    get,
    path = "/user/{user_id}",
    tag = "Users",
    params(("user_id" = String, Path, description = "Identifier returned by registration")),
    responses(
        (status = 200, description = "User with latest credit profile", body = UserDetail),
        (status = 400, description = "Malformed user id"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserDetail>, AppError> {
    tracing::info!("GET /user/{}", user_id);
    let id = parse_user_id(&user_id)?;

    let user = state
        .store
        .find_user(&id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let credit_profile = state.store.latest_credit_profile(&id).await;

    Ok(Json(UserDetail {
        user,
        credit_profile,
    }))
}

/// POST /calculate-score
///
/// Scores the submitted financial data and stores it as the user's newest
/// credit profile.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `payload` - JSON body with the user id and five scoring inputs.
///
/// # Returns
///
/// * `Result<Json<ScoreResult>, AppError>` - Score, risk category, explanations and
///   recommendations.
#[utoipa::path(
    post,
    path = "/calculate-score",
    tag = "Credit Score",
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Score calculated", body = ScoreResult),
        (status = 400, description = "Malformed user id"),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn calculate_score(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let request = json_body(payload)?;
    let valid = validate_score_request(&request)?;

    let user = state
        .store
        .find_user(&valid.user_id)
        .await
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let assessment = calculate_digital_trust_score(&valid.input, user.months_active);
    let recommendations =
        generate_recommendations(assessment.score, assessment.risk, &valid.input);
    let profile = state
        .store
        .insert_credit_profile(&valid.user_id, &valid.input, &assessment)
        .await;

    tracing::info!(
        "Scored user {}: {} ({})",
        user.id,
        assessment.score,
        assessment.risk
    );

    Ok(Json(ScoreResult {
        digital_trust_score: assessment.score,
        risk_category: assessment.risk.label().to_string(),
        explanation: assessment.explanations,
        user_id: Some(user.id),
        credit_profile_id: Some(profile.id),
        recommendations,
    }))
}
