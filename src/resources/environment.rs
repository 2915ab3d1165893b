// ABOUTME: Environment data source, a pure key-to-id passthrough with no remote call
// ABOUTME: Exists so configurations can reference environments symbolically
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use serde_json::json;

use super::{AttributeMap, DataSource, ResourceState};
use crate::constants::resource_types;
use crate::errors::{Error, Result};

/// The `optimizely_environment` data source.
pub struct EnvironmentDataSource;

impl DataSource for EnvironmentDataSource {
    fn type_name(&self) -> &'static str {
        resource_types::ENVIRONMENT
    }

    fn read(&self, attributes: &AttributeMap) -> Result<ResourceState> {
        let key = attributes
            .get("key")
            .and_then(|value| value.as_str())
            .ok_or_else(|| Error::validation("key", "environment key must be a string"))?;

        let mut state = AttributeMap::new();
        state.insert("id".to_string(), json!(key));
        state.insert("key".to_string(), json!(key));
        Ok(ResourceState::new(key, state))
    }
}
