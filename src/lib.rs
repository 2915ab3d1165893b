// ABOUTME: Library entry point for the Optimizely feature-management provider
// ABOUTME: Maps declarative resources onto the vendor REST API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

#![deny(unsafe_code)]

//! # Optimizely Provider
//!
//! Declarative resource management for the Optimizely feature-management
//! REST API: audiences, feature flags, variations, and per-environment
//! rollout rulesets.
//!
//! The crate is organized the way the API is consumed:
//!
//! - [`client`]: the HTTP transport wrapper plus typed CRUD operations for
//!   each entity (audiences, flags, variations, rulesets).
//! - [`models`]: domain types mirroring the vendor entities, including the
//!   tagged audience-condition tree.
//! - [`resources`]: the declarative surface — typed configuration structs,
//!   the [`resources::Resource`] lifecycle trait, and the passthrough data
//!   sources.
//! - [`provider`]: the root registry wiring resources to the shared client.
//!
//! Every operation is a sequence of strictly sequential, fully buffered
//! HTTP round trips. The provider holds no authoritative state of its own;
//! the remote API is the system of record.
//!
//! ## Example
//!
//! ```rust,no_run
//! use optimizely_provider::{OptimizelyProvider, ProviderConfig};
//!
//! # fn main() -> optimizely_provider::Result<()> {
//! let config = ProviderConfig::new("https://api.optimizely.com", "token", 4000)?;
//! let provider = OptimizelyProvider::new(&config);
//! let audience = provider.resource("optimizely_audience")?;
//! # let _ = audience;
//! # Ok(())
//! # }
//! ```

/// HTTP transport and typed API clients
pub mod client;

/// Provider-level configuration
pub mod config;

/// Crate-wide constants and environment variable names
pub mod constants;

/// Structured error types
pub mod errors;

/// Logging initialization helpers
pub mod logging;

/// Domain models for vendor entities
pub mod models;

/// Provider root and registry
pub mod provider;

/// Declarative resource and data-source surface
pub mod resources;

pub use client::OptimizelyClient;
pub use config::ProviderConfig;
pub use errors::{Error, Result};
pub use provider::OptimizelyProvider;
