use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_cine_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("CINE_PORT");
        env::remove_var("CINE_BIND_ADDR");
        env::remove_var("CINE_QDRANT_URL");
        env::remove_var("CINE_COLLECTION");
        env::remove_var("CINE_CACHE_ENABLED");
        env::remove_var("CINE_CACHE_CAPACITY");
        env::remove_var("CINE_RESULT_TTL_SECS");
        env::remove_var("CINE_SCAN_CAP");
        env::remove_var("CINE_OVERSAMPLE_FACTOR");
        env::remove_var("CINE_EMBED_STUB");
        env::remove_var("CINE_EMBED_CACHE_DIR");
        env::remove_var("CINE_CACHE_TIMEOUT_MS");
        env::remove_var("CINE_EMBED_TIMEOUT_MS");
        env::remove_var("CINE_INDEX_TIMEOUT_MS");
        env::remove_var("CINE_SCAN_TIMEOUT_MS");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_cine_env();
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.qdrant_url, DEFAULT_QDRANT_URL);
    assert_eq!(config.collection, "movies");
    assert!(config.cache_enabled);
    assert_eq!(config.result_ttl_secs, 86_400);
    assert_eq!(config.scan_cap, 1_000);
    assert_eq!(config.oversample_factor, 10);
    assert!(!config.embed_stub);
    assert!(config.embed_cache_dir.is_none());
}

#[test]
#[serial]
fn test_from_env_uses_defaults_when_unset() {
    clear_cine_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.collection, "movies");
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_cine_env();
    let config = with_env_vars(
        &[
            ("CINE_PORT", "9191"),
            ("CINE_BIND_ADDR", "0.0.0.0"),
            ("CINE_QDRANT_URL", "http://qdrant.internal:6334"),
            ("CINE_COLLECTION", "films"),
            ("CINE_CACHE_ENABLED", "false"),
            ("CINE_SCAN_CAP", "250"),
            ("CINE_OVERSAMPLE_FACTOR", "20"),
            ("CINE_EMBED_STUB", "1"),
        ],
        || Config::from_env().unwrap(),
    );

    assert_eq!(config.port, 9191);
    assert_eq!(config.bind_addr, IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));
    assert_eq!(config.qdrant_url, "http://qdrant.internal:6334");
    assert_eq!(config.collection, "films");
    assert!(!config.cache_enabled);
    assert_eq!(config.scan_cap, 250);
    assert_eq!(config.oversample_factor, 20);
    assert!(config.embed_stub);
}

#[test]
#[serial]
fn test_invalid_port_rejected() {
    clear_cine_env();
    let result = with_env_vars(&[("CINE_PORT", "0")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidPort { .. })));

    let result = with_env_vars(&[("CINE_PORT", "not-a-port")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::PortParseError { .. })));
}

#[test]
#[serial]
fn test_invalid_bind_addr_rejected() {
    clear_cine_env();
    let result = with_env_vars(&[("CINE_BIND_ADDR", "nowhere")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBindAddr { .. })));
}

#[test]
#[serial]
fn test_malformed_numeric_falls_back_to_default() {
    clear_cine_env();
    let config = with_env_vars(&[("CINE_SCAN_CAP", "plenty")], || Config::from_env().unwrap());
    assert_eq!(config.scan_cap, 1_000);
}

#[test]
#[serial]
fn test_bool_parsing_variants() {
    clear_cine_env();
    for value in ["1", "true", "YES", "on"] {
        let config =
            with_env_vars(&[("CINE_EMBED_STUB", value)], || Config::from_env().unwrap());
        assert!(config.embed_stub, "expected {value:?} to parse as true");
    }

    let config = with_env_vars(&[("CINE_EMBED_STUB", "0")], || Config::from_env().unwrap());
    assert!(!config.embed_stub);
}

#[test]
#[serial]
fn test_socket_addr_format() {
    clear_cine_env();
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_validate_accepts_defaults() {
    clear_cine_env();
    assert!(Config::default().validate().is_ok());
}
