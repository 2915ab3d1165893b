// ABOUTME: Audience resource lifecycle wiring configuration attributes to the audience client
// ABOUTME: Delete archives the audience; the vendor API has no hard delete
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{decode_attributes, AttributeMap, Resource, ResourceState};
use crate::client::OptimizelyClient;
use crate::constants::resource_types;
use crate::errors::{Error, Result};
use crate::models::Audience;

/// Typed configuration for `optimizely_audience`.
#[derive(Debug, Deserialize)]
struct AudienceConfig {
    /// Owning project; falls back to the provider-level project id
    #[serde(default)]
    project: Option<i64>,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    conditions: String,
}

impl AudienceConfig {
    fn into_audience(self, client: &OptimizelyClient) -> Audience {
        Audience {
            id: None,
            project_id: self.project.unwrap_or_else(|| client.project_id()),
            name: self.name,
            description: self.description,
            conditions: self.conditions,
            archived: false,
        }
    }
}

/// The `optimizely_audience` resource.
pub struct AudienceResource;

fn audience_attributes(audience: &Audience) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    attributes.insert("project".to_string(), json!(audience.project_id));
    attributes.insert("name".to_string(), json!(audience.name));
    attributes.insert("description".to_string(), json!(audience.description));
    attributes.insert("conditions".to_string(), json!(audience.conditions));
    attributes.insert("archived".to_string(), json!(audience.archived));
    attributes
}

fn require_id(audience: &Audience) -> Result<i64> {
    audience
        .id
        .ok_or_else(|| Error::validation("id", "API response did not include an audience id"))
}

#[async_trait]
impl Resource for AudienceResource {
    fn type_name(&self) -> &'static str {
        resource_types::AUDIENCE
    }

    async fn create(
        &self,
        client: &OptimizelyClient,
        attributes: &AttributeMap,
    ) -> Result<ResourceState> {
        let config: AudienceConfig = decode_attributes(self.type_name(), attributes)?;
        let created = client
            .create_audience(&config.into_audience(client))
            .await?;
        let id = require_id(&created)?;

        info!(audience_id = id, "created audience");

        // Read back so the snapshot reflects the system of record.
        self.read(client, &ResourceState::new(id.to_string(), AttributeMap::new()))
            .await
    }

    async fn read(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
    ) -> Result<ResourceState> {
        let audience = client.get_audience(&state.id).await?;
        let id = require_id(&audience)?;
        Ok(ResourceState::new(
            id.to_string(),
            audience_attributes(&audience),
        ))
    }

    async fn update(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
        attributes: &AttributeMap,
    ) -> Result<ResourceState> {
        let id: i64 = state.id.parse().map_err(|_| {
            Error::validation("id", format!("'{}' is not a valid audience id", state.id))
        })?;

        let config: AudienceConfig = decode_attributes(self.type_name(), attributes)?;
        let mut audience = config.into_audience(client);
        audience.id = Some(id);

        client.update_audience(&audience).await?;
        self.read(client, state).await
    }

    async fn delete(&self, client: &OptimizelyClient, state: &ResourceState) -> Result<()> {
        let archived = client.archive_audience(&state.id).await?;
        info!(audience_id = %state.id, archived = archived.archived, "archived audience");
        Ok(())
    }
}
