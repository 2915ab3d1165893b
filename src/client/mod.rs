// ABOUTME: HTTP transport wrapper for the Optimizely API with bearer auth and error classification
// ABOUTME: Typed CRUD operations per entity live in the sibling modules as impl blocks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

mod audience;
mod flag;
mod ruleset;
mod variation;

pub use ruleset::PatchOp;

use std::time::Duration;

use bytes::Bytes;
use reqwest::{header, Client, ClientBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::constants::defaults;
use crate::errors::{Error, Result};

pub use reqwest::Method;

/// Bounded retry policy for the optional retrying transport.
///
/// Disabled by default; enabled via provider configuration. Only transport
/// failures and 429/5xx responses are retried, with a fixed backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Additional attempts after the first request
    pub max_retries: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// No retries: every failure surfaces immediately.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Default bounded policy used when retries are enabled.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            max_retries: defaults::MAX_RETRIES,
            backoff: Duration::from_millis(defaults::RETRY_BACKOFF_MS),
        }
    }
}

/// Client for the Optimizely feature-management REST API.
///
/// Holds the immutable per-invocation configuration (base address, token,
/// default project id) and a pooled `reqwest` client. Every operation is a
/// sequence of fully buffered request/response round trips; the client
/// keeps no other state.
#[derive(Debug, Clone)]
pub struct OptimizelyClient {
    http: Client,
    address: String,
    token: String,
    project_id: i64,
    retry: RetryPolicy,
}

impl OptimizelyClient {
    /// Build a client from provider configuration.
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let http = ClientBuilder::new()
            .timeout(Duration::from_secs(defaults::TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        let retry = if config.http_retry {
            RetryPolicy::standard()
        } else {
            RetryPolicy::disabled()
        };

        Self {
            http,
            address: config.host.clone(),
            token: config.token.clone(),
            project_id: config.project_id,
            retry,
        }
    }

    /// Default project id from the provider configuration.
    #[must_use]
    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    /// Execute one API request and classify the response.
    ///
    /// The URL is the configured base address joined with `path`. A bearer
    /// token is always attached; a JSON content type only when a body is
    /// present. Status ≥ 400 becomes [`Error::Api`] carrying the status
    /// code and raw body text; success returns the raw body bytes for the
    /// caller to decode.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Bytes> {
        let url = format!("{}/{}", self.address, path.trim_start_matches('/'));
        let mut attempt: u32 = 0;

        loop {
            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(header::AUTHORIZATION, format!("Bearer {}", self.token));

            if let Some(payload) = &body {
                request = request
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(payload.clone());
            }

            debug!(%method, %url, attempt, "sending Optimizely API request");

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    let bytes = response.bytes().await?;

                    if status.as_u16() < 400 {
                        return Ok(bytes);
                    }

                    if attempt < self.retry.max_retries && retryable_status(status.as_u16()) {
                        attempt += 1;
                        warn!(%url, status = status.as_u16(), attempt, "retrying request");
                        tokio::time::sleep(self.retry.backoff).await;
                        continue;
                    }

                    return Err(Error::Api {
                        status: status.as_u16(),
                        body: String::from_utf8_lossy(&bytes).into_owned(),
                    });
                }
                Err(err) => {
                    if attempt < self.retry.max_retries {
                        attempt += 1;
                        warn!(%url, error = %err, attempt, "retrying after transport failure");
                        tokio::time::sleep(self.retry.backoff).await;
                        continue;
                    }
                    return Err(err.into());
                }
            }
        }
    }
}

/// Only rate limiting and server-side failures are worth retrying.
fn retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Decode a response body, tagging failures with the entity being decoded.
pub(crate) fn decode<T: DeserializeOwned>(context: &'static str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| Error::Decode { context, source })
}

/// Encode a request payload, tagging failures with the entity being encoded.
pub(crate) fn encode<T: serde::Serialize>(context: &'static str, payload: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(|source| Error::Encode { context, source })
}
