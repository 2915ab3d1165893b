// ABOUTME: Audience entity matching the v2/audiences wire format
// ABOUTME: Conditions are an opaque serialized JSON logic tree
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use serde::{Deserialize, Serialize};

/// A named, reusable targeting condition expression.
///
/// `conditions` is passed through opaquely as the serialized JSON logic
/// tree the vendor API expects; the provider does not interpret it.
/// Deleting an audience only archives it (soft delete).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    /// Vendor-assigned id, absent until the audience is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Owning project
    pub project_id: i64,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Serialized JSON condition expression
    #[serde(default)]
    pub conditions: String,
    /// Soft-delete marker
    #[serde(default)]
    pub archived: bool,
}
