// ABOUTME: Flag CRUD against flags/v1 with the variable-definitions map transform
// ABOUTME: Flag metadata is immutable upstream, so there is no update operation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{decode, encode, Method, OptimizelyClient};
use crate::errors::Result;
use crate::models::{Flag, VariableSchema};

/// Wire shape for flag creation: variables travel as a map keyed by
/// variable key, not as the declaration-ordered list the domain model uses.
#[derive(Serialize)]
struct FlagPayload<'a> {
    key: &'a str,
    name: &'a str,
    description: &'a str,
    variable_definitions: BTreeMap<&'a str, VariableDefinition<'a>>,
}

#[derive(Serialize)]
struct VariableDefinition<'a> {
    key: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    default_value: &'a str,
    description: &'a str,
}

#[derive(Deserialize)]
struct FlagResponse {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    project_id: i64,
    #[serde(default)]
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    variable_definitions: BTreeMap<String, VariableSchema>,
}

impl FlagResponse {
    fn into_flag(self) -> Flag {
        Flag {
            id: self.id,
            project_id: self.project_id,
            key: self.key,
            name: self.name,
            description: self.description,
            archived: self.archived,
            variables: self.variable_definitions.into_values().collect(),
            variations: Vec::new(),
            environments: BTreeMap::new(),
        }
    }
}

impl OptimizelyClient {
    /// Create a flag with its variable definitions. Variations and rulesets
    /// are created by separate calls and are not atomic with this one.
    pub async fn create_flag(&self, flag: &Flag) -> Result<Flag> {
        let payload = FlagPayload {
            key: &flag.key,
            name: &flag.name,
            description: &flag.description,
            variable_definitions: flag
                .variables
                .iter()
                .map(|variable| {
                    (
                        variable.key.as_str(),
                        VariableDefinition {
                            key: &variable.key,
                            kind: &variable.kind,
                            default_value: &variable.default_value,
                            description: "",
                        },
                    )
                })
                .collect(),
        };

        debug!(project_id = flag.project_id, key = %flag.key, "creating flag");

        let body = encode("flag", &payload)?;
        let path = format!("flags/v1/projects/{}/flags", flag.project_id);
        let bytes = self.send(Method::POST, &path, Some(body)).await?;
        let response: FlagResponse = decode("flag", &bytes)?;
        Ok(response.into_flag())
    }

    /// Fetch a flag by project id and key.
    pub async fn get_flag(&self, project_id: i64, flag_key: &str) -> Result<Flag> {
        let path = format!("flags/v1/projects/{project_id}/flags/{flag_key}");
        let bytes = self.send(Method::GET, &path, None).await?;
        let response: FlagResponse = decode("flag", &bytes)?;
        Ok(response.into_flag())
    }

    /// Delete a flag by project id and key.
    pub async fn delete_flag(&self, project_id: i64, flag_key: &str) -> Result<()> {
        debug!(project_id, flag_key, "deleting flag");
        let path = format!("flags/v1/projects/{project_id}/flags/{flag_key}");
        self.send(Method::DELETE, &path, None).await?;
        Ok(())
    }
}
