//! Axum handlers. Each one translates a JSON request into a catalog, auth,
//! or round engine call.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use verbdrill_core::statistics::ProgressSummary;
use verbdrill_core::{Exercise, RoundEngine, RoundView, SubmitOutcome};

use crate::auth::AuthStore;
use crate::config::TEST_USER;
use crate::error::ApiError;

/// Practice categories shown on the landing page.
pub const CATEGORIES: &[&str] = &["Verb Conjugation", "Separable Verbs"];

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RoundEngine>,
    pub auth: Arc<AuthStore>,
    pub test_login: bool,
}

/// Envelope wrapping every response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::new(data)))
}

#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    pub email: String,
    /// Accepted but not verified.
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreatePresetRequest {
    pub id: String,
    #[serde(default)]
    pub forms: Vec<Exercise>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePresetResponse {
    pub id: String,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRoundRequest {
    pub preset_id: String,
    #[serde(default, alias = "token")]
    pub identity_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub round_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRequest {
    pub round_id: String,
}

/// All `/api` routes plus `/health`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/test-login", post(test_login))
        .route("/auth/logout", post(logout))
        .route("/me", get(me))
        .route("/categories", get(categories))
        .route("/presets", get(list_presets).post(create_preset))
        .route("/round/start", post(start_round))
        .route("/round/submit", post(submit_answer))
        .route("/round/next", post(next_exercise))
        .route("/progress", get(progress));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> ApiResult<&'static str> {
    ok("ok")
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<AuthPayload>,
) -> (StatusCode, Json<ApiResponse<&'static str>>) {
    state.auth.register(&payload.email);
    (StatusCode::CREATED, Json(ApiResponse::new("registered")))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<AuthPayload>,
) -> ApiResult<TokenResponse> {
    let token = state.auth.login(&payload.email)?;
    ok(TokenResponse { token })
}

async fn test_login(State(state): State<AppState>) -> ApiResult<TokenResponse> {
    if !state.test_login {
        return Err(ApiError::TestLoginDisabled);
    }
    let token = state.auth.force_login(TEST_USER);
    ok(TokenResponse { token })
}

async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> ApiResult<&'static str> {
    state.auth.logout(&payload.token);
    ok("logged_out")
}

async fn me(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<MeResponse> {
    let email = query
        .token
        .and_then(|token| state.auth.whoami(&token))
        .ok_or(ApiError::Unauthorized)?;
    ok(MeResponse { email })
}

async fn categories() -> ApiResult<Vec<&'static str>> {
    ok(CATEGORIES.to_vec())
}

async fn list_presets(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    ok(state.engine.catalog().list_preset_ids())
}

async fn create_preset(
    State(state): State<AppState>,
    Json(req): Json<CreatePresetRequest>,
) -> (StatusCode, Json<ApiResponse<CreatePresetResponse>>) {
    let count = req.forms.len();
    state.engine.catalog().create_or_replace(req.id.clone(), req.forms);
    (
        StatusCode::CREATED,
        Json(ApiResponse::new(CreatePresetResponse { id: req.id, count })),
    )
}

async fn start_round(
    State(state): State<AppState>,
    Json(req): Json<StartRoundRequest>,
) -> ApiResult<RoundView> {
    let view = state
        .engine
        .start(&req.identity_token, &req.preset_id)
        .await?;
    ok(view)
}

async fn submit_answer(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> ApiResult<SubmitOutcome> {
    ok(state.engine.submit(&req.round_id, &req.answer)?)
}

async fn next_exercise(
    State(state): State<AppState>,
    Json(req): Json<NextRequest>,
) -> ApiResult<RoundView> {
    ok(state.engine.advance(&req.round_id)?)
}

async fn progress(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> ApiResult<ProgressSummary> {
    let identity = query
        .token
        .filter(|token| state.auth.is_active(token))
        .ok_or(ApiError::Unauthorized)?;
    ok(ProgressSummary::for_identity(state.engine.ledger(), &identity))
}
