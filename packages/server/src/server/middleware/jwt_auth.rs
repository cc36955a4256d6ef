use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::common::UserId;
use crate::domains::auth::{AuthError, JwtService};
use crate::server::app::AppState;
use crate::server::error::ApiError;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
}

/// Resolve the bearer token in `headers` to the identity it was issued for.
///
/// A missing or non-`Bearer` header fails as `Unauthenticated` before any
/// token validation is attempted.
pub fn authenticate(headers: &HeaderMap, jwt_service: &JwtService) -> Result<AuthUser, AuthError> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::Unauthenticated)?
        .to_str()
        .map_err(|_| AuthError::Unauthenticated)?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Unauthenticated)?;

    let claims = jwt_service.verify_token(token)?;

    Ok(AuthUser {
        user_id: claims.user_id,
        email: claims.email,
    })
}

/// JWT authentication middleware
///
/// Rejects the request with 401 unless a valid bearer token is present, then
/// adds AuthUser to request extensions for downstream handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(request.headers(), &state.deps.jwt_service)
        .inspect_err(|e| debug!(reason = %e, "Rejected unauthenticated request"))?;

    debug!(user_id = %user.user_id, "Authenticated user");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
