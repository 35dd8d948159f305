//! Cookie-based JWT guard.
//!
//! The guard runs fully before the protected handler: missing cookie means
//! 401, failed signature/expiry check means 403, and only verified claims
//! ever reach the handler (via request extensions). There is no code path
//! that proceeds with an unverified token.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::types::TokenClaims;

/// Name of the auth cookie set by `POST /jwt`.
pub const TOKEN_COOKIE: &str = "token";

/// Extracts the value of the `token` cookie from a `Cookie` header line.
pub fn token_from_cookie_header(header_value: &str) -> Option<&str> {
    header_value.split(';').map(str::trim).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        if name == TOKEN_COOKIE && !value.is_empty() {
            Some(value)
        } else {
            None
        }
    })
}

/// Verifies signature and expiry of a token and returns its claims.
pub fn decode_claims(secret: &str, token: &str) -> AppResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = jsonwebtoken::decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Axum middleware enforcing a valid `token` cookie.
///
/// On success the decoded [`TokenClaims`] are stored in the request
/// extensions for the handler to consume.
pub async fn require_token(
    State(cfg): State<Arc<AppConfig>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(token_from_cookie_header)
        .ok_or_else(|| AppError::Unauthorized("Missing token cookie".to_string()))?
        .to_string();

    let claims = decode_claims(&cfg.auth.token_secret, &token)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
