use super::*;

// Env mutation is unsafe in edition 2024; each test owns distinct keys except
// the from_env tests, which run in one function.

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u16 = env_parse("__PLANOGRAM_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__PLANOGRAM_TEST_VALID__", "8080") };
    let val: u16 = env_parse("__PLANOGRAM_TEST_VALID__", 0);
    assert_eq!(val, 8080);
    unsafe { std::env::remove_var("__PLANOGRAM_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__PLANOGRAM_TEST_INVALID__", "99999") };
    let val: u16 = env_parse("__PLANOGRAM_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__PLANOGRAM_TEST_INVALID__") };
}

#[test]
fn env_parse_reads_ip_addresses() {
    unsafe { std::env::set_var("__PLANOGRAM_TEST_HOST__", "127.0.0.1") };
    let val: IpAddr = env_parse("__PLANOGRAM_TEST_HOST__", DEFAULT_HOST);
    assert_eq!(val, IpAddr::V4(Ipv4Addr::LOCALHOST));
    unsafe { std::env::remove_var("__PLANOGRAM_TEST_HOST__") };
}

// =============================================================================
// ServerConfig
// =============================================================================

#[test]
fn from_env_defaults_then_overrides() {
    unsafe {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("CATALOG_DIR");
    }
    let config = ServerConfig::from_env();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.catalog_dir, PathBuf::from(DEFAULT_CATALOG_DIR));
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3000");

    unsafe {
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", "4100");
        std::env::set_var("CATALOG_DIR", "/srv/stores");
    }
    let config = ServerConfig::from_env();
    assert_eq!(config.bind_addr().to_string(), "127.0.0.1:4100");
    assert_eq!(config.catalog_dir, PathBuf::from("/srv/stores"));
    unsafe {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
        std::env::remove_var("CATALOG_DIR");
    }
}
