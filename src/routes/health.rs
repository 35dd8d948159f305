use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Static greeting at the root, kept from the original service
pub async fn greeting() -> impl IntoResponse {
    (StatusCode::OK, "Library is open for all!")
}

// Health check endpoint - lightweight
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: checks DB connectivity with timeout protection
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, format!("not ready: {}", e)).into_response(),
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

// Metrics endpoint: returns JSON snapshot
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.metrics.get_snapshot();
    Json(snapshot)
}

// Prometheus-compatible text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP buchhalle_books_created Total books created\n# TYPE buchhalle_books_created counter\nbuchhalle_books_created {}\n\
# HELP buchhalle_borrows_created Total borrows recorded\n# TYPE buchhalle_borrows_created counter\nbuchhalle_borrows_created {}\n\
# HELP buchhalle_borrows_rejected Borrows rejected for lack of copies\n# TYPE buchhalle_borrows_rejected counter\nbuchhalle_borrows_rejected {}\n\
# HELP buchhalle_returns_completed Total returns completed\n# TYPE buchhalle_returns_completed counter\nbuchhalle_returns_completed {}\n\
# HELP buchhalle_tokens_issued Total auth tokens issued\n# TYPE buchhalle_tokens_issued counter\nbuchhalle_tokens_issued {}\n\
# HELP buchhalle_uptime_seconds Uptime seconds\n# TYPE buchhalle_uptime_seconds gauge\nbuchhalle_uptime_seconds {}\n",
        m.books_created,
        m.borrows_created,
        m.borrows_rejected,
        m.returns_completed,
        m.tokens_issued,
        m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

// Version/Build info endpoint (JSON)
pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
