//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::errors::ErrorKind;
use siteguard_core::error::CoreError;
use siteguard_core::types::DbId;
use siteguard_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// The token's subject must still exist in storage -- a valid token for a
/// deleted user is rejected. Expired and malformed tokens are distinguished
/// in logs only; the client always sees the same 401.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
}

/// The uniform message for every token failure; anything more specific
/// would leak whether a token was once valid.
const UNAUTHORIZED_MSG: &str = "Invalid or expired token";

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("Rejected expired token"),
                kind => tracing::debug!(?kind, "Rejected malformed token"),
            }
            AppError::Core(CoreError::Unauthorized(UNAUTHORIZED_MSG.into()))
        })?;

        // The subject must still exist: a deleted user's token is dead even
        // if its signature and expiry check out.
        let user = UserRepo::find_by_id(&state.pool, claims.sub).await?;
        if user.is_none() {
            tracing::debug!(user_id = claims.sub, "Rejected token for deleted user");
            return Err(AppError::Core(CoreError::Unauthorized(
                UNAUTHORIZED_MSG.into(),
            )));
        }

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
