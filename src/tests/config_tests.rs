#[cfg(test)]
mod tests {
    use crate::config::{self, AppConfig};
    use crate::tests::support::test_config;

    #[test]
    fn test_embedded_defaults_parse() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3000);
        assert!(cfg.database.url.starts_with("sqlite://"));
        assert_eq!(cfg.auth.token_ttl_minutes, 60);
        assert!(!cfg.auth.secure_cookies);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config::validate(&AppConfig::default()).is_ok());
        assert!(config::validate(&test_config()).is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut cfg = test_config();
        cfg.server.port = 0;
        assert!(config::validate(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let mut cfg = test_config();
        cfg.auth.token_secret = String::new();
        assert!(config::validate(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_ttl() {
        let mut cfg = test_config();
        cfg.auth.token_ttl_minutes = 0;
        assert!(config::validate(&cfg).is_err());
        cfg.auth.token_ttl_minutes = 2000;
        assert!(config::validate(&cfg).is_err());
        cfg.auth.token_ttl_minutes = 1440;
        assert!(config::validate(&cfg).is_ok());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_creates_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("data").join("app.db");
        let url = format!("sqlite://{}", db_path.display());
        config::ensure_sqlite_parent_dir(&url).unwrap();
        assert!(db_path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_ensure_sqlite_parent_dir_ignores_non_sqlite_urls() {
        assert!(config::ensure_sqlite_parent_dir("postgres://localhost/db").is_ok());
    }
}
