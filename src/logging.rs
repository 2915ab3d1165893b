// ABOUTME: Logging initialization built on tracing with env-filter support
// ABOUTME: Used by binaries and tests embedding the provider library
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize a formatted `tracing` subscriber.
///
/// The filter is taken from `RUST_LOG` when set, falling back to `info`.
/// Calling this more than once returns an error from the subscriber
/// registry; embedders that install their own subscriber should simply not
/// call it.
pub fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))
}
