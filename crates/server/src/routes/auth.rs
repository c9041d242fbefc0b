//! Authentication route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use parfum_core::UserId;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::middleware::auth::{clear_session, set_current_user};
use crate::models::{CurrentUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Request body for registration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The session user as the API exposes it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserResponse {
    pub id: UserId,
    pub first_name: String,
    pub email: String,
}

fn session_user(user: &User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
    }
}

fn user_response(user: &CurrentUser) -> SessionUserResponse {
    SessionUserResponse {
        id: user.id,
        first_name: user.first_name.clone(),
        email: user.email.to_string(),
    }
}

/// `POST /api/auth/register` - Create an account and log it in.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register(
            &request.first_name,
            &request.last_name,
            &request.email,
            &request.password,
        )
        .await?;

    let current = session_user(&user);
    set_current_user(&session, &current).await?;

    tracing::info!(user_id = %user.id, "Account registered");

    Ok((StatusCode::CREATED, Json(user_response(&current))))
}

/// `POST /api/auth/login` - Verify credentials and start a session.
#[instrument(skip_all, fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionUserResponse>> {
    let user = AuthService::new(state.pool())
        .login(&request.email, &request.password)
        .await?;

    // Rotate the session id on privilege change.
    session.cycle_id().await?;

    let current = session_user(&user);
    set_current_user(&session, &current).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(user_response(&current)))
}

/// `POST /api/auth/logout` - Destroy the session (cart included).
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    clear_session(&session).await?;
    Ok(StatusCode::OK)
}

/// `GET /api/auth/me` - Current session user, or 401.
#[instrument(skip_all)]
pub async fn me(RequireAuth(user): RequireAuth) -> Json<SessionUserResponse> {
    Json(user_response(&user))
}
