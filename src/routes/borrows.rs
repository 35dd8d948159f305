//! Borrow/return flow and the borrowed-books listing.
//!
//! Both mutating flows run inside a single transaction so the quantity
//! bookkeeping and the ledger entry can never diverge: a failed insert
//! rolls the decrement back, and a missing borrow record aborts the return
//! before any increment happens. The decrement itself is conditional on
//! `quantity > 0`, so two concurrent borrows of the last copy cannot both
//! succeed and the count never goes negative.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde_json::{json, Map, Value};
use sqlx::Row;
use uuid::Uuid;

use crate::error::{validation, AppError, AppResult};
use crate::state::AppState;
use crate::types::{BorrowListQuery, BorrowRecord, BorrowRequest, InsertResponse, ReturnRequest, TokenClaims};

/// Top-level record fields; client-supplied extras colliding with these are
/// dropped instead of shadowing them in the flattened response.
const RESERVED_FIELDS: [&str; 6] = ["id", "book_id", "bookId", "user_email", "email", "borrowed_at"];

fn sanitized_details(details: Map<String, Value>) -> Map<String, Value> {
    details.into_iter().filter(|(k, _)| !RESERVED_FIELDS.contains(&k.as_str())).collect()
}

/// GET /bookBorrowed?email= - all ledger entries for one borrower.
///
/// Sits behind the token guard; the verified claims arrive via request
/// extensions and must match the requested email.
pub async fn list_borrowed(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Query(query): Query<BorrowListQuery>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let email = query.email.unwrap_or_default();
    validation::validate_email(&email)?;

    if claims.email != email {
        return Err(AppError::Forbidden("Token does not match requested email".to_string()));
    }

    let rows = sqlx::query(
        r#"SELECT id, book_id, user_email, details, borrowed_at
           FROM borrows WHERE user_email = ?1"#,
    )
    .bind(&email)
    .fetch_all(&state.db)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        let id: String = row.try_get("id")?;
        let book_id: String = row.try_get("book_id")?;
        let details: Option<String> = row.try_get("details")?;
        let details = match details {
            Some(raw) => serde_json::from_str::<Map<String, Value>>(&raw)
                .map_err(|e| AppError::Database(format!("corrupt borrow details: {}", e)))?,
            None => Map::new(),
        };
        records.push(BorrowRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| AppError::Database(format!("invalid borrow id in store: {}", e)))?,
            book_id: Uuid::parse_str(&book_id)
                .map_err(|e| AppError::Database(format!("invalid book id in store: {}", e)))?,
            user_email: row.try_get("user_email")?,
            borrowed_at: row.try_get("borrowed_at")?,
            details,
        });
    }

    Ok(Json(records))
}

/// POST /borrow/{id} - borrow one copy of a book.
///
/// Decrement and ledger insert are one atomic unit. 404 for an unknown
/// book, 409 when no copies are left.
pub async fn borrow_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Json(req): Json<BorrowRequest>,
) -> AppResult<Json<InsertResponse>> {
    validation::validate_email(&req.email)?;

    let mut tx = state.db.begin().await?;

    // Floor-checked decrement: zero rows hit means either the book does
    // not exist or the last copy is already out.
    let decremented =
        sqlx::query("UPDATE books SET quantity = quantity - 1 WHERE id = ?1 AND quantity > 0")
            .bind(book_id.to_string())
            .execute(&mut *tx)
            .await?;

    if decremented.rows_affected() == 0 {
        let exists = sqlx::query("SELECT 1 FROM books WHERE id = ?1")
            .bind(book_id.to_string())
            .fetch_optional(&mut *tx)
            .await?;
        return Err(match exists {
            Some(_) => {
                state.metrics.inc_borrows_rejected();
                AppError::Conflict("No copies available".to_string())
            }
            None => AppError::NotFound("Book not found".to_string()),
        });
    }

    let id = Uuid::new_v4();
    let details = sanitized_details(req.details);
    let details_json = if details.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&details).map_err(|e| AppError::Internal(e.into()))?)
    };

    sqlx::query(
        r#"INSERT INTO borrows (id, book_id, user_email, details)
           VALUES (?1, ?2, ?3, ?4)"#,
    )
    .bind(id.to_string())
    .bind(book_id.to_string())
    .bind(&req.email)
    .bind(details_json)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    state.metrics.inc_borrows_created();
    tracing::debug!(borrow_id = %id, book_id = %book_id, email = %req.email, "book borrowed");

    Ok(Json(InsertResponse { id }))
}

/// DELETE /bookBorrowed/{id} - return a borrowed book.
///
/// The ledger entry is resolved before anything is incremented: returning
/// a nonexistent borrow id is a plain 404 with no quantity change.
pub async fn return_book(
    State(state): State<AppState>,
    Path(borrow_id): Path<Uuid>,
    Json(req): Json<ReturnRequest>,
) -> AppResult<Json<Value>> {
    let mut tx = state.db.begin().await?;

    let row = sqlx::query("SELECT book_id FROM borrows WHERE id = ?1")
        .bind(borrow_id.to_string())
        .fetch_optional(&mut *tx)
        .await?;

    let stored_book_id: String = match row {
        Some(row) => row.try_get("book_id")?,
        None => return Err(AppError::NotFound("Borrow record not found".to_string())),
    };
    if stored_book_id != req.book_id.to_string() {
        return Err(AppError::ValidationError {
            field: "bookId".to_string(),
            message: "Does not match the borrowed book".to_string(),
        });
    }

    sqlx::query("DELETE FROM borrows WHERE id = ?1")
        .bind(borrow_id.to_string())
        .execute(&mut *tx)
        .await?;

    sqlx::query("UPDATE books SET quantity = quantity + 1 WHERE id = ?1")
        .bind(&stored_book_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    state.metrics.inc_returns_completed();
    tracing::debug!(borrow_id = %borrow_id, book_id = %stored_book_id, "book returned");

    Ok(Json(json!({ "message": "Book returned successfully" })))
}
