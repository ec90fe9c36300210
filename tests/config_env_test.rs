// Environment overrides for ClientConfig
// These tests mutate process environment, so they run serially.

use lexa::config::{ClientConfig, LOG_ENV, TIMEOUT_ENV, URL_ENV};
use serial_test::serial;
use std::time::Duration;

fn clear_env() {
    std::env::remove_var(URL_ENV);
    std::env::remove_var(TIMEOUT_ENV);
    std::env::remove_var(LOG_ENV);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(ClientConfig::from_env(), ClientConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(URL_ENV, "https://lexa.example/");
    std::env::set_var(TIMEOUT_ENV, "3");
    std::env::set_var(LOG_ENV, "lexa=debug");

    let config = ClientConfig::from_env();
    assert_eq!(config.base_url, "https://lexa.example");
    assert_eq!(config.request_timeout, Duration::from_secs(3));
    assert_eq!(config.log_filter, "lexa=debug");

    clear_env();
}

#[test]
#[serial]
fn test_from_env_ignores_invalid_values() {
    clear_env();
    std::env::set_var(URL_ENV, "   ");
    std::env::set_var(TIMEOUT_ENV, "bald");

    let config = ClientConfig::from_env();
    assert_eq!(config.base_url, "http://localhost:8000");
    assert_eq!(config.request_timeout, Duration::from_secs(10));

    std::env::set_var(TIMEOUT_ENV, "0");
    assert_eq!(ClientConfig::from_env().request_timeout, Duration::from_secs(10));

    clear_env();
}

#[test]
#[serial]
fn test_cli_url_wins_over_env() {
    clear_env();
    std::env::set_var(URL_ENV, "http://from-env:8000");

    let config = ClientConfig::from_env().with_base_url("http://from-flag:9000");
    assert_eq!(config.base_url, "http://from-flag:9000");

    clear_env();
}
