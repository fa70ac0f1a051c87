use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use tracing::debug;

use moodtunes_types::api::Claims;

use crate::auth::AppState;
use crate::error::ApiError;

/// Caller identity on routes that accept anonymous use.
#[derive(Debug, Clone, Default)]
pub struct Identity(pub Option<Claims>);

/// Reject the request unless it carries a valid bearer token.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = bearer_claims(&state.jwt_secret, req.headers())?.ok_or(ApiError::Unauthenticated)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Attach an [`Identity`]. A missing, expired or foreign token means anonymous.
pub async fn attach_identity(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let claims = match bearer_claims(&state.jwt_secret, req.headers()) {
        Ok(claims) => claims,
        Err(_) => {
            debug!("Ignoring invalid bearer token on open route");
            None
        }
    };
    req.extensions_mut().insert(Identity(claims));
    next.run(req).await
}

fn bearer_claims(secret: &str, headers: &HeaderMap) -> Result<Option<Claims>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(ApiError::Unauthenticated)?;

    decode_token(secret, token).map(Some).map_err(|_| ApiError::Unauthenticated)
}

pub fn decode_token(secret: &str, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}
