// ABOUTME: Structured error types covering every failure mode of provider operations
// ABOUTME: Distinguishes remote rejections, transport faults, codec failures, and validation errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for provider operations.
///
/// Remote rejections keep the raw status code and body so they can be
/// surfaced verbatim as user-facing diagnostics. Validation errors replace
/// the panics the dynamic attribute-bag design produced for wrongly typed
/// configuration values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The Optimizely API rejected the request with a non-2xx status.
    #[error("Optimizely API returned status {status}: {body}")]
    Api {
        /// HTTP status code of the rejected request
        status: u16,
        /// Raw response body text, kept for diagnostics
        body: String,
    },

    /// The HTTP request could not be completed (network, DNS, TLS).
    #[error("HTTP transport failure")]
    Http {
        /// Underlying reqwest error
        #[from]
        source: reqwest::Error,
    },

    /// A request payload could not be serialized to JSON.
    #[error("failed to encode {context} payload")]
    Encode {
        /// Payload being encoded when the failure occurred
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode {context} response")]
    Decode {
        /// Response being decoded when the failure occurred
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A configuration attribute had the wrong type or an invalid value.
    #[error("invalid value for '{attribute}': {reason}")]
    Validation {
        /// Attribute (or resource type) that failed validation
        attribute: String,
        /// Why the value was rejected
        reason: String,
    },

    /// Provider-level configuration is missing or malformed.
    #[error("missing or invalid configuration: {key}")]
    Config {
        /// Configuration key (environment variable or field name)
        key: &'static str,
    },

    /// The requested resource or data-source type is not registered.
    #[error("unknown resource type '{type_name}'")]
    UnknownType {
        /// Type name that was looked up
        type_name: String,
    },
}

impl Error {
    /// Build a validation error for a single attribute.
    #[must_use]
    pub fn validation(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    /// Status code of a remote rejection, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
