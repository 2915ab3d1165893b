// ABOUTME: Audience CRUD operations against the v2/audiences endpoints
// ABOUTME: Delete is a soft delete that PATCHes archived=true
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use serde_json::json;
use tracing::debug;

use super::{decode, encode, Method, OptimizelyClient};
use crate::errors::{Error, Result};
use crate::models::Audience;

impl OptimizelyClient {
    /// Create an audience and return the stored record, including its id.
    pub async fn create_audience(&self, audience: &Audience) -> Result<Audience> {
        let body = encode("audience", audience)?;
        let bytes = self.send(Method::POST, "v2/audiences", Some(body)).await?;
        decode("audience", &bytes)
    }

    /// Fetch an audience by id.
    pub async fn get_audience(&self, audience_id: &str) -> Result<Audience> {
        let path = format!("v2/audiences/{audience_id}");
        let bytes = self.send(Method::GET, &path, None).await?;
        decode("audience", &bytes)
    }

    /// Replace the mutable fields of an audience. Requires an id.
    pub async fn update_audience(&self, audience: &Audience) -> Result<Audience> {
        let id = audience.id.ok_or_else(|| {
            Error::validation("id", "audience id is required for update")
        })?;

        let body = encode("audience", audience)?;
        let path = format!("v2/audiences/{id}");
        let bytes = self.send(Method::PATCH, &path, Some(body)).await?;
        decode("audience", &bytes)
    }

    /// Soft-delete an audience by setting `archived=true`. Other fields are
    /// left untouched.
    pub async fn archive_audience(&self, audience_id: &str) -> Result<Audience> {
        debug!(audience_id, "archiving audience");
        let body = encode("audience", &json!({ "archived": true }))?;
        let path = format!("v2/audiences/{audience_id}");
        let bytes = self.send(Method::PATCH, &path, Some(body)).await?;
        decode("audience", &bytes)
    }
}
