use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort, log failures)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    // Foreign keys are critical - fail if this doesn't work
    sqlx::query("PRAGMA foreign_keys=ON;").execute(pool).await?;
    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // books table
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS books (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            image TEXT NULL,
            category TEXT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            rating REAL NULL,
            author TEXT NULL,
            description TEXT NULL,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now'))
        )"#,
    )
    .execute(pool)
    .await?;

    // borrows table (the ledger); rows reference the book whose copy
    // count they account for
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS borrows (
            id TEXT PRIMARY KEY,
            book_id TEXT NOT NULL,
            user_email TEXT NOT NULL,
            details TEXT NULL,
            borrowed_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ','now')),
            FOREIGN KEY(book_id) REFERENCES books(id) ON DELETE CASCADE
        )"#,
    )
    .execute(pool)
    .await?;

    // One-time repair for legacy rows that stored quantity as TEXT.
    // Write paths normalize to integers, so this only ever fires on
    // databases created by the old service.
    let migrated = sqlx::query(
        r#"UPDATE books SET quantity = CAST(quantity AS INTEGER)
           WHERE typeof(quantity) = 'text'"#,
    )
    .execute(pool)
    .await?;
    if migrated.rows_affected() > 0 {
        tracing::info!("Coerced {} legacy string quantities to integers", migrated.rows_affected());
    }

    let indexes = [
        ("idx_books_category", "CREATE INDEX IF NOT EXISTS idx_books_category ON books(category)"),
        ("idx_borrows_email", "CREATE INDEX IF NOT EXISTS idx_borrows_email ON borrows(user_email)"),
        ("idx_borrows_book", "CREATE INDEX IF NOT EXISTS idx_borrows_book ON borrows(book_id)"),
    ];

    for (name, query) in indexes {
        if let Err(e) = sqlx::query(query).execute(pool).await {
            match &e {
                sqlx::Error::Database(db_err) => {
                    let msg = db_err.message().to_lowercase();
                    if msg.contains("already exists") || msg.contains("duplicate") {
                        tracing::debug!("Index {} already exists, skipping", name);
                    } else {
                        tracing::warn!("Failed to create index {}: {}", name, e);
                    }
                }
                _ => {
                    tracing::warn!("Failed to create index {}: {}", name, e);
                }
            }
        }
    }

    Ok(())
}
