// ABOUTME: Variation creation and listing per flag, boxing variable values as {"value": ...}
// ABOUTME: The vendor API offers no update or delete for variations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::{decode, encode, Method, OptimizelyClient};
use crate::errors::Result;
use crate::models::{Flag, Variation};

#[derive(Serialize, Deserialize)]
struct BoxedValue {
    value: Value,
}

#[derive(Serialize)]
struct VariationPayload<'a> {
    key: &'a str,
    name: &'a str,
    description: &'a str,
    variables: BTreeMap<&'a str, BoxedValue>,
}

/// List responses arrive wrapped in an `{"items": [...]}` envelope.
#[derive(Deserialize)]
struct VariationList {
    #[serde(default)]
    items: Vec<VariationItem>,
}

#[derive(Deserialize)]
struct VariationItem {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    variables: BTreeMap<String, BoxedValue>,
}

impl OptimizelyClient {
    /// Create one variation for a flag.
    pub async fn create_variation(&self, flag: &Flag, variation: &Variation) -> Result<()> {
        let payload = VariationPayload {
            key: &variation.key,
            name: &variation.name,
            description: &variation.description,
            variables: variation
                .variables
                .iter()
                .map(|(key, value)| {
                    (
                        key.as_str(),
                        BoxedValue {
                            value: value.clone(),
                        },
                    )
                })
                .collect(),
        };

        debug!(flag = %flag.key, variation = %variation.key, "creating variation");

        let body = encode("variation", &payload)?;
        let path = format!(
            "flags/v1/projects/{}/flags/{}/variations",
            flag.project_id, flag.key
        );
        self.send(Method::POST, &path, Some(body)).await?;
        Ok(())
    }

    /// List all variations of a flag, unboxing the variable values.
    pub async fn list_variations(
        &self,
        project_id: i64,
        flag_key: &str,
    ) -> Result<Vec<Variation>> {
        let path = format!("flags/v1/projects/{project_id}/flags/{flag_key}/variations");
        let bytes = self.send(Method::GET, &path, None).await?;
        let list: VariationList = decode("variation list", &bytes)?;

        Ok(list
            .items
            .into_iter()
            .map(|item| Variation {
                key: item.key,
                name: item.name,
                description: item.description,
                variables: item
                    .variables
                    .into_iter()
                    .map(|(key, boxed)| (key, boxed.value))
                    .collect(),
            })
            .collect())
    }
}
