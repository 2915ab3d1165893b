// ABOUTME: Crate-wide constants and environment variable names for provider configuration
// ABOUTME: Keeps endpoint defaults, retry limits, and resource type names in one place
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

/// Environment variables read by [`crate::config::ProviderConfig::from_env`].
pub mod env_vars {
    /// Base URL of the Optimizely API
    pub const HOST: &str = "OPTIMIZELY_HOST";
    /// Bearer token used for every request
    pub const TOKEN: &str = "OPTIMIZELY_TOKEN";
    /// Default project id for resources that do not set one
    pub const PROJECT_ID: &str = "OPTIMIZELY_PROJECT_ID";
    /// Opt-in flag for the retrying transport ("1", "true", "yes")
    pub const HTTP_RETRY: &str = "OPTIMIZELY_HTTP_RETRY";
}

/// Default values applied when configuration is absent.
pub mod defaults {
    /// Public Optimizely API host
    pub const API_HOST: &str = "https://api.optimizely.com";
    /// Request timeout in seconds
    pub const TIMEOUT_SECS: u64 = 30;
    /// Connection timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Retry attempts when the retrying transport is enabled
    pub const MAX_RETRIES: u32 = 3;
    /// Fixed backoff between retries, in milliseconds
    pub const RETRY_BACKOFF_MS: u64 = 500;
}

/// Externally visible resource and data-source type names.
pub mod resource_types {
    /// Audience resource
    pub const AUDIENCE: &str = "optimizely_audience";
    /// Feature flag resource
    pub const FEATURE: &str = "optimizely_feature";
    /// Environment data source (key passthrough)
    pub const ENVIRONMENT: &str = "optimizely_environment";
    /// Project data source (id passthrough)
    pub const PROJECT: &str = "optimizely_project";
}
