use axum::{
    extract::{Path, Query, State},
    Json,
};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::error::{validation, AppError, AppResult, OptionExt};
use crate::state::AppState;
use crate::types::{Book, BookListQuery, CreateBookRequest, InsertResponse, UpdateBookRequest, UpdateResponse};

fn book_from_row(row: &SqliteRow) -> AppResult<Book> {
    let id: String = row.try_get("id")?;
    Ok(Book {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::Database(format!("invalid book id in store: {}", e)))?,
        name: row.try_get("name")?,
        image: row.try_get("image")?,
        category: row.try_get("category")?,
        quantity: row.try_get("quantity")?,
        rating: row.try_get("rating")?,
        author: row.try_get("author")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
    })
}

/// GET /books - all books, optionally restricted to an exact
/// (case-sensitive) category match.
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookListQuery>,
) -> AppResult<Json<Vec<Book>>> {
    let rows = match query.category {
        Some(ref category) if !category.is_empty() => {
            sqlx::query(
                r#"SELECT id, name, image, category, quantity, rating, author, description, created_at
                   FROM books WHERE category = ?1"#,
            )
            .bind(category)
            .fetch_all(&state.db)
            .await?
        }
        _ => {
            sqlx::query(
                r#"SELECT id, name, image, category, quantity, rating, author, description, created_at
                   FROM books"#,
            )
            .fetch_all(&state.db)
            .await?
        }
    };

    let books = rows.iter().map(book_from_row).collect::<AppResult<Vec<_>>>()?;
    Ok(Json(books))
}

/// POST /books - insert a new book; quantity arrives as integer or numeric
/// string and is stored as an integer either way.
pub async fn create_book(
    State(state): State<AppState>,
    Json(req): Json<CreateBookRequest>,
) -> AppResult<Json<InsertResponse>> {
    validation::validate_required_str(&req.name, "name")?;
    let quantity = req.quantity.unwrap_or(0);
    validation::validate_quantity(quantity)?;

    let id = Uuid::new_v4();
    sqlx::query(
        r#"INSERT INTO books (id, name, image, category, quantity, rating, author, description)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
    )
    .bind(id.to_string())
    .bind(&req.name)
    .bind(&req.image)
    .bind(&req.category)
    .bind(quantity)
    .bind(req.rating)
    .bind(&req.author)
    .bind(&req.description)
    .execute(&state.db)
    .await?;

    state.metrics.inc_books_created();
    tracing::debug!(book_id = %id, name = %req.name, "book created");

    Ok(Json(InsertResponse { id }))
}

/// GET /books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Book>> {
    let row = sqlx::query(
        r#"SELECT id, name, image, category, quantity, rating, author, description, created_at
           FROM books WHERE id = ?1"#,
    )
    .bind(id.to_string())
    .fetch_optional(&state.db)
    .await?;

    let row = row.ok_or_not_found("Book")?;
    Ok(Json(book_from_row(&row)?))
}

/// PUT /books/{id} - updates only the fixed writable field set; fields
/// absent from the body stay untouched. Reports a success shape with
/// `matched = 0` when no book has that id.
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBookRequest>,
) -> AppResult<Json<UpdateResponse>> {
    if let Some(name) = &req.name {
        validation::validate_required_str(name, "name")?;
    }
    if let Some(quantity) = req.quantity {
        validation::validate_quantity(quantity)?;
    }

    let result = sqlx::query(
        r#"UPDATE books SET
             name = COALESCE(?1, name),
             image = COALESCE(?2, image),
             category = COALESCE(?3, category),
             quantity = COALESCE(?4, quantity),
             rating = COALESCE(?5, rating),
             author = COALESCE(?6, author),
             description = COALESCE(?7, description)
           WHERE id = ?8"#,
    )
    .bind(&req.name)
    .bind(&req.image)
    .bind(&req.category)
    .bind(req.quantity)
    .bind(req.rating)
    .bind(&req.author)
    .bind(&req.description)
    .bind(id.to_string())
    .execute(&state.db)
    .await?;

    let matched = result.rows_affected();
    Ok(Json(UpdateResponse { matched, modified: matched }))
}
