//! Handlers for the `/auth` resource (signup, login).

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use siteguard_core::error::CoreError;
use siteguard_db::models::user::{CreateUser, UserResponse};
use siteguard_db::repositories::UserRepo;
use validator::ValidateEmail;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

/// The uniform message for failed logins. An unknown email and a wrong
/// password are deliberately indistinguishable.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`. Fields are optional at the parse
/// layer so that missing values surface as validation messages rather than
/// a body-rejection.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful authentication payload returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserResponse,
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /auth/signup
///
/// Register a new user and issue a bearer token.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let mut errors = Vec::new();

    let name = input.name.unwrap_or_default();
    if name.trim().is_empty() {
        errors.push("name is required".to_string());
    }

    let email = input.email.unwrap_or_default().trim().to_lowercase();
    if !email.validate_email() {
        errors.push("email must be a valid email address".to_string());
    }

    let password = input.password.unwrap_or_default();
    if let Err(msg) = validate_password_strength(&password) {
        errors.push(msg);
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Pre-check for a friendly message; the uq_users_email index is the
    // backstop against a concurrent signup with the same address.
    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name,
            email,
            password_hash,
        },
    )
    .await?;

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "New user registered");

    Ok(Json(ApiResponse::new(
        "Signup successful",
        AuthPayload {
            user: user.to_response(),
            token,
        },
    )))
}

/// POST /auth/login
///
/// Authenticate with email + password and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthPayload>>> {
    let (Some(email), Some(password)) = (input.email, input.password) else {
        return Err(AppError::BadRequest("Email and password are required".into()));
    };
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".into()));
    }

    let user = match UserRepo::find_by_email(&state.pool, &email).await? {
        Some(user) => user,
        None => {
            // Burn comparable work to a real verification so an unknown
            // email does not return measurably faster than a wrong password.
            let _ = hash_password(&password);
            return Err(AppError::Core(CoreError::Unauthorized(
                INVALID_CREDENTIALS.into(),
            )));
        }
    };

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(ApiResponse::new(
        "Login successful",
        AuthPayload {
            user: user.to_response(),
            token,
        },
    )))
}
