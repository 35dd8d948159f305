#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use serde_json::Value;

    use crate::error::{validation, AppError, OptionExt};

    async fn envelope(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_status_codes() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AppError::ServiceUnavailable("x".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, expected) in cases {
            let (status, body) = envelope(err).await;
            assert_eq!(status, expected);
            assert_eq!(body["status"], expected.as_u16());
            assert!(body["error"]["code"].as_str().is_some());
            assert!(body["timestamp"].as_str().is_some());
        }
    }

    #[tokio::test]
    async fn test_internal_error_is_opaque_but_traceable() {
        let (status, body) = envelope(AppError::Internal(anyhow::anyhow!("secret detail"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        // The client sees an error id, not the internal message
        assert!(body["error"]["details"]["error_id"].as_str().is_some());
        assert!(!body["error"]["message"].as_str().unwrap().contains("secret detail"));
    }

    #[tokio::test]
    async fn test_validation_error_carries_field() {
        let err = AppError::ValidationError { field: "email".into(), message: "Email is required".into() };
        let (status, body) = envelope(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["details"]["field"], "email");
    }

    #[test]
    fn test_sqlx_row_not_found_maps_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_ok_or_not_found() {
        assert_eq!(Some(3).ok_or_not_found("Book").unwrap(), 3);
        let err = None::<i32>.ok_or_not_found("Book").unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Book not found"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validation::validate_email("reader@example.com").is_ok());
        assert!(validation::validate_email("").is_err());
        assert!(validation::validate_email("   ").is_err());
        assert!(validation::validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validation::validate_quantity(0).is_ok());
        assert!(validation::validate_quantity(10).is_ok());
        assert!(validation::validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_required_str() {
        assert!(validation::validate_required_str("x", "name").is_ok());
        assert!(validation::validate_required_str("", "name").is_err());
        assert!(validation::validate_required_str("  ", "name").is_err());
    }
}
