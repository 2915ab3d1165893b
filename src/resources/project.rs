// ABOUTME: Project data source, an id passthrough with no remote call
// ABOUTME: Accepts numeric or string ids since configurations use both
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use serde_json::{json, Value};

use super::{AttributeMap, DataSource, ResourceState};
use crate::constants::resource_types;
use crate::errors::{Error, Result};

/// The `optimizely_project` data source.
pub struct ProjectDataSource;

impl DataSource for ProjectDataSource {
    fn type_name(&self) -> &'static str {
        resource_types::PROJECT
    }

    fn read(&self, attributes: &AttributeMap) -> Result<ResourceState> {
        let id = match attributes.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(Error::validation(
                    "id",
                    "project id must be a string or number",
                ))
            }
        };

        let mut state = AttributeMap::new();
        state.insert("id".to_string(), json!(id));
        Ok(ResourceState::new(id, state))
    }
}
