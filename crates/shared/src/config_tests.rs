use super::*;

#[test]
fn test_defaults_without_sources() {
    temp_env::with_vars_unset(
        [
            "FILMBUDGET__API__BASE_URL",
            "FILMBUDGET__API__TIMEOUT_SECS",
            "FILMBUDGET__GRID__SHOW_FINANCE",
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.api.base_url, "http://localhost:8000/api");
            assert_eq!(config.api.timeout_secs, 30);
            assert_eq!(config.cache.ttl_secs, 300);
            assert!(!config.grid.show_finance);
            assert_eq!(
                config.session.token_file,
                PathBuf::from(".filmbudget/tokens.json")
            );
        },
    );
}

#[test]
fn test_environment_overrides() {
    temp_env::with_vars(
        [
            ("FILMBUDGET__API__BASE_URL", Some("https://budget.example.com/api")),
            ("FILMBUDGET__API__TIMEOUT_SECS", Some("5")),
            ("FILMBUDGET__GRID__SHOW_FINANCE", Some("true")),
        ],
        || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.api.base_url, "https://budget.example.com/api");
            assert_eq!(config.api.timeout_secs, 5);
            assert!(config.grid.show_finance);
        },
    );
}
