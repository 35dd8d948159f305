//! Token cookie issuing and logout.
//!
//! `POST /jwt` signs an HS256 token over the borrower's email and sets it
//! as an HttpOnly cookie; `POST /logout` expires that cookie. Cookie
//! attributes follow `auth.secure_cookies`: `Secure; SameSite=None` behind
//! HTTPS, `SameSite=Strict` in local development.

use axum::{extract::State, http::header, response::IntoResponse, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::error::{validation, AppError, AppResult};
use crate::middleware::auth::TOKEN_COOKIE;
use crate::state::AppState;
use crate::types::{TokenClaims, TokenRequest, TokenResponse};

fn cookie_attributes(secure: bool) -> &'static str {
    if secure {
        "; HttpOnly; Path=/; Secure; SameSite=None"
    } else {
        "; HttpOnly; Path=/; SameSite=Strict"
    }
}

fn session_cookie(token: &str, ttl_minutes: u64, secure: bool) -> String {
    format!(
        "{}={}; Max-Age={}{}",
        TOKEN_COOKIE,
        token,
        ttl_minutes * 60,
        cookie_attributes(secure)
    )
}

fn expired_cookie(secure: bool) -> String {
    format!("{}=; Max-Age=0{}", TOKEN_COOKIE, cookie_attributes(secure))
}

/// POST /jwt - issue a token cookie for the given borrower email.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> AppResult<impl IntoResponse> {
    let email = req.email.unwrap_or_default();
    validation::validate_email(&email)?;

    let now = chrono::Utc::now().timestamp();
    let ttl = state.config.auth.token_ttl_minutes;
    let claims = TokenClaims { email, iat: now, exp: now + (ttl as i64) * 60 };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.auth.token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.into()))?;

    state.metrics.inc_tokens_issued();
    tracing::debug!(email = %claims.email, "token issued");

    let cookie = session_cookie(&token, ttl, state.config.auth.secure_cookies);
    Ok(([(header::SET_COOKIE, cookie)], Json(TokenResponse { success: true, token })))
}

/// POST /logout - expire the token cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = expired_cookie(state.config.auth.secure_cookies);
    ([(header::SET_COOKIE, cookie)], Json(json!({ "success": true })))
}
