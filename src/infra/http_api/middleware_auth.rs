use axum::{
    Extension,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    domain::user::Actor,
    infra::http_api::{AppState, error::ApiError},
    use_cases::auth_service::authenticate,
};

/// Validates the bearer token and stores the acting user as an `Actor`
/// request extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let actor = authenticate(state.db.clone(), &state.tokens, token)
        .await
        .inspect_err(|err| debug!(error = %err, "rejected bearer token"))?;

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

pub async fn require_admin(
    Extension(actor): Extension<Actor>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !actor.is_admin {
        warn!(user_id = %actor.user_id, path = %request.uri().path(), "admin route refused");
        return Err(ApiError::forbidden("admin rights required"));
    }

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("missing auth token"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("invalid auth token"))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(ApiError::unauthorized("wrong authorization header format")),
    }
}
