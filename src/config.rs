// ABOUTME: Provider-level configuration with environment variable loading and validation
// ABOUTME: Carries the API host, bearer token, default project id, and retry opt-in
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::env;

use tracing::debug;
use url::Url;

use crate::constants::{defaults, env_vars};
use crate::errors::{Error, Result};

/// Immutable provider configuration shared by every operation.
///
/// Built once, either directly or via [`ProviderConfig::from_env`], and
/// passed into the client constructor. There is no ambient global state.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Base URL of the Optimizely API, without a trailing slash
    pub host: String,
    /// Bearer token attached to every request
    pub token: String,
    /// Default project id for resources that do not declare one
    pub project_id: i64,
    /// Enables bounded retries for transport failures and 429/5xx responses
    pub http_retry: bool,
}

impl ProviderConfig {
    /// Create a configuration, validating the host URL.
    pub fn new(host: impl Into<String>, token: impl Into<String>, project_id: i64) -> Result<Self> {
        let host = host.into();
        Url::parse(&host).map_err(|_| Error::Config { key: "host" })?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            token: token.into(),
            project_id,
            http_retry: false,
        })
    }

    /// Enable or disable the retrying transport.
    #[must_use]
    pub fn with_http_retry(mut self, enabled: bool) -> Self {
        self.http_retry = enabled;
        self
    }

    /// Load configuration from `OPTIMIZELY_*` environment variables.
    ///
    /// `OPTIMIZELY_HOST` falls back to the public API host; the token and
    /// project id are required.
    pub fn from_env() -> Result<Self> {
        let host =
            env::var(env_vars::HOST).unwrap_or_else(|_| defaults::API_HOST.to_string());

        let token = env::var(env_vars::TOKEN).map_err(|_| Error::Config {
            key: env_vars::TOKEN,
        })?;

        let project_id = env::var(env_vars::PROJECT_ID)
            .map_err(|_| Error::Config {
                key: env_vars::PROJECT_ID,
            })?
            .parse::<i64>()
            .map_err(|_| Error::Config {
                key: env_vars::PROJECT_ID,
            })?;

        let http_retry = env::var(env_vars::HTTP_RETRY)
            .map(|value| parse_bool_flag(&value))
            .unwrap_or(false);

        debug!(host = %host, project_id, http_retry, "loaded provider configuration");

        Ok(Self::new(host, token, project_id)?.with_http_retry(http_retry))
    }
}

fn parse_bool_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes")
}
