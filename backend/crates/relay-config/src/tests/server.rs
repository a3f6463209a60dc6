use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

// =========================================================================
// Validation Tests - Server / Ports
// =========================================================================

#[test]
#[serial]
fn given_max_subscribers_zero_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("RELAY_SERVER_MAX_SUBSCRIBERS", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_max_subscribers_over_limit_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _max = EnvGuard::set("RELAY_SERVER_MAX_SUBSCRIBERS", "200000");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_empty_host_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _host = EnvGuard::set("RELAY_SERVER_HOST", " ");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_producer_and_subscriber_same_port_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _producer = EnvGuard::set("RELAY_PRODUCER_PORT", "9100");
    let _subscriber = EnvGuard::set("RELAY_SUBSCRIBER_PORT", "9100");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_all_ports_zero_when_validate_then_ok() {
    // Given - port 0 means OS auto-assign, so duplicates are fine
    let _temp = setup_config_dir();
    let _producer = EnvGuard::set("RELAY_PRODUCER_PORT", "0");
    let _subscriber = EnvGuard::set("RELAY_SUBSCRIBER_PORT", "0");
    let _http = EnvGuard::set("RELAY_HTTP_PORT", "0");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_empty_log_file_when_validate_then_error() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::set("RELAY_LOG_FILE", "");

    // When
    let config = Config::load().unwrap();
    let result = config.validate();

    // Then
    assert_that!(result, err(anything()));
}
