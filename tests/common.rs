// ABOUTME: Shared test utilities for integration tests
// ABOUTME: Provides quiet logging setup and wiremock-backed client construction
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc
)]

use std::sync::Once;

use optimizely_provider::{OptimizelyClient, OptimizelyProvider, ProviderConfig};
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process).
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Test project id used across the suite.
pub const TEST_PROJECT_ID: i64 = 4000;

/// Start a mock API server and a client pointed at it.
pub async fn mock_client() -> (MockServer, OptimizelyClient) {
    init_test_logging();
    let server = MockServer::start().await;
    let config = ProviderConfig::new(server.uri(), "test-token", TEST_PROJECT_ID).unwrap();
    let client = OptimizelyClient::new(&config);
    (server, client)
}

/// Same as [`mock_client`] but with the retrying transport enabled.
pub async fn mock_client_with_retry() -> (MockServer, OptimizelyClient) {
    init_test_logging();
    let server = MockServer::start().await;
    let config = ProviderConfig::new(server.uri(), "test-token", TEST_PROJECT_ID)
        .unwrap()
        .with_http_retry(true);
    let client = OptimizelyClient::new(&config);
    (server, client)
}

/// Start a mock API server and a full provider pointed at it.
pub async fn mock_provider() -> (MockServer, OptimizelyProvider) {
    init_test_logging();
    let server = MockServer::start().await;
    let config = ProviderConfig::new(server.uri(), "test-token", TEST_PROJECT_ID).unwrap();
    let provider = OptimizelyProvider::new(&config);
    (server, provider)
}
