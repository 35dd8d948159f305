#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Row, SqlitePool};

    use crate::db;

    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_init_db_creates_schema() {
        let pool = test_pool().await;
        db::init_db(&pool).await.unwrap();

        for table in ["books", "borrows"] {
            let row = sqlx::query("SELECT count(*) AS n FROM sqlite_master WHERE type='table' AND name=?1")
                .bind(table)
                .fetch_one(&pool)
                .await
                .unwrap();
            let n: i64 = row.get("n");
            assert_eq!(n, 1, "missing table {}", table);
        }
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let pool = test_pool().await;
        db::init_db(&pool).await.unwrap();
        db::init_db(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_legacy_text_quantity_is_migrated() {
        let pool = test_pool().await;
        db::init_db(&pool).await.unwrap();

        // Simulate a row written by the old service with a string quantity.
        // The value must not look numeric or SQLite's column affinity would
        // already coerce it on insert.
        sqlx::query("INSERT INTO books (id, name, quantity) VALUES ('legacy-1', 'Old', '5 ')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("UPDATE books SET quantity = '7x' WHERE id = 'legacy-1'")
            .execute(&pool)
            .await
            .unwrap();

        let row = sqlx::query("SELECT typeof(quantity) AS t FROM books WHERE id='legacy-1'")
            .fetch_one(&pool)
            .await
            .unwrap();
        let t: String = row.get("t");
        assert_eq!(t, "text");

        // Re-running init runs the repair pass
        db::init_db(&pool).await.unwrap();

        let row = sqlx::query("SELECT typeof(quantity) AS t, quantity AS q FROM books WHERE id='legacy-1'")
            .fetch_one(&pool)
            .await
            .unwrap();
        let t: String = row.get("t");
        let q: i64 = row.get("q");
        assert_eq!(t, "integer");
        assert_eq!(q, 7);
    }

    #[tokio::test]
    async fn test_borrow_requires_existing_book() {
        let pool = test_pool().await;
        db::init_db(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO borrows (id, book_id, user_email) VALUES ('b1', 'no-such-book', 'r@example.com')",
        )
        .execute(&pool)
        .await;
        assert!(result.is_err(), "foreign key on borrows.book_id should be enforced");
    }

    #[tokio::test]
    async fn test_deleting_a_book_cascades_to_its_borrows() {
        let pool = test_pool().await;
        db::init_db(&pool).await.unwrap();

        sqlx::query("INSERT INTO books (id, name, quantity) VALUES ('bk1', 'A', 1)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO borrows (id, book_id, user_email) VALUES ('b1', 'bk1', 'r@example.com')")
            .execute(&pool)
            .await
            .unwrap();

        sqlx::query("DELETE FROM books WHERE id='bk1'").execute(&pool).await.unwrap();

        let row = sqlx::query("SELECT count(*) AS n FROM borrows").fetch_one(&pool).await.unwrap();
        let n: i64 = row.get("n");
        assert_eq!(n, 0);
    }
}
