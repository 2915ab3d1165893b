// ABOUTME: Feature resource orchestrating flag, variation, and ruleset calls
// ABOUTME: Rule blocks expand per environment into rollout rules with scaled percentages
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{decode_attributes, AttributeMap, Resource, ResourceState};
use crate::client::OptimizelyClient;
use crate::constants::resource_types;
use crate::errors::{Error, Result};
use crate::models::{
    audience_ids, percent_to_wire, wire_to_percent, Condition, FeatureEnvironment, Flag,
    RolloutRule, VariableSchema, Variation,
};

/// Typed configuration for `optimizely_feature`.
#[derive(Debug, Deserialize)]
struct FeatureConfig {
    project: i64,
    #[serde(default)]
    key: String,
    name: String,
    description: String,
    #[serde(default)]
    variable_schema: Vec<VariableBlock>,
    #[serde(default)]
    variations: Vec<VariationBlock>,
    #[serde(default)]
    rules: Vec<RuleBlock>,
}

#[derive(Debug, Deserialize)]
struct VariableBlock {
    key: String,
    #[serde(rename = "type")]
    kind: String,
    default_value: String,
    #[serde(default)]
    archived: bool,
}

#[derive(Debug, Deserialize)]
struct VariationBlock {
    key: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    variables: BTreeMap<String, Value>,
}

/// One declared rollout rule, applied to each listed environment.
#[derive(Debug, Deserialize)]
struct RuleBlock {
    key: String,
    environments: Vec<String>,
    #[serde(default)]
    audience: Vec<String>,
    percentage_included: i64,
    deliver: String,
}

impl FeatureConfig {
    /// Expand the configuration into the domain aggregate, building each
    /// environment's rule list in declaration order and scaling percentages
    /// to the wire representation.
    fn into_flag(self) -> Result<Flag> {
        let mut environments: BTreeMap<String, FeatureEnvironment> = BTreeMap::new();

        for rule in &self.rules {
            if !(0..=100).contains(&rule.percentage_included) {
                return Err(Error::validation(
                    "percentage_included",
                    format!(
                        "rule '{}' has percentage {} outside [0, 100]",
                        rule.key, rule.percentage_included
                    ),
                ));
            }

            let mut ids = Vec::with_capacity(rule.audience.len());
            for audience in &rule.audience {
                let id: i64 = audience.parse().map_err(|_| {
                    Error::validation(
                        "audience",
                        format!("'{audience}' is not a valid audience id"),
                    )
                })?;
                ids.push(id);
            }

            let rollout_rule = RolloutRule {
                key: rule.key.clone(),
                audience_conditions: Condition::all_of(&ids),
                percentage_included: percent_to_wire(rule.percentage_included),
                deliver: rule.deliver.clone(),
            };

            for environment in &rule.environments {
                environments
                    .entry(environment.clone())
                    .or_default()
                    .rollout_rules
                    .push(rollout_rule.clone());
            }
        }

        Ok(Flag {
            id: None,
            project_id: self.project,
            key: self.key,
            name: self.name,
            description: self.description,
            archived: false,
            variables: self
                .variable_schema
                .into_iter()
                .map(|block| VariableSchema {
                    key: block.key,
                    kind: block.kind,
                    default_value: block.default_value,
                    archived: block.archived,
                })
                .collect(),
            variations: self
                .variations
                .into_iter()
                .map(|block| Variation {
                    key: block.key,
                    name: block.name,
                    description: block.description,
                    variables: block.variables,
                })
                .collect(),
            environments,
        })
    }
}

/// The `optimizely_feature` resource.
pub struct FeatureResource;

/// Collapse per-environment rollout rules back into declaration-style rule
/// blocks, grouping by rule key and flattening audience conditions.
fn rule_blocks(environments: &BTreeMap<String, FeatureEnvironment>) -> Vec<Value> {
    let mut order: Vec<String> = Vec::new();
    let mut blocks: BTreeMap<String, Value> = BTreeMap::new();

    for (environment, feature_env) in environments {
        for rule in &feature_env.rollout_rules {
            let entry = blocks.entry(rule.key.clone()).or_insert_with(|| {
                order.push(rule.key.clone());
                json!({
                    "key": rule.key,
                    "environments": [],
                    "audience": audience_ids(&rule.audience_conditions)
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                    "percentage_included": wire_to_percent(rule.percentage_included),
                    "deliver": rule.deliver,
                })
            });
            if let Some(envs) = entry
                .get_mut("environments")
                .and_then(Value::as_array_mut)
            {
                envs.push(json!(environment));
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| blocks.remove(&key))
        .collect()
}

fn flag_attributes(flag: &Flag) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    attributes.insert("project".to_string(), json!(flag.project_id));
    attributes.insert("key".to_string(), json!(flag.key));
    attributes.insert("name".to_string(), json!(flag.name));
    attributes.insert("description".to_string(), json!(flag.description));
    attributes.insert(
        "variable_schema".to_string(),
        json!(flag
            .variables
            .iter()
            .map(|variable| {
                json!({
                    "key": variable.key,
                    "type": variable.kind,
                    "default_value": variable.default_value,
                    "archived": variable.archived,
                })
            })
            .collect::<Vec<_>>()),
    );
    attributes.insert(
        "variations".to_string(),
        json!(flag
            .variations
            .iter()
            .map(|variation| {
                json!({
                    "key": variation.key,
                    "name": variation.name,
                    "description": variation.description,
                    "variables": variation.variables,
                })
            })
            .collect::<Vec<_>>()),
    );
    attributes.insert("rules".to_string(), Value::Array(rule_blocks(&flag.environments)));
    attributes
}

#[async_trait]
impl Resource for FeatureResource {
    fn type_name(&self) -> &'static str {
        resource_types::FEATURE
    }

    /// Create the flag, then its variations, then its rulesets, then enable
    /// them. The calls are not atomic: a failure part-way leaves earlier
    /// objects in place with no compensating delete.
    async fn create(
        &self,
        client: &OptimizelyClient,
        attributes: &AttributeMap,
    ) -> Result<ResourceState> {
        let config: FeatureConfig = decode_attributes(self.type_name(), attributes)?;
        let flag = config.into_flag()?;

        let created = client.create_flag(&flag).await?;
        let id = created.id.ok_or_else(|| {
            Error::validation("id", "API response did not include a flag id")
        })?;

        for variation in &flag.variations {
            client.create_variation(&flag, variation).await?;
        }

        client.create_ruleset(&flag).await?;
        client.enable_ruleset(&flag).await?;

        info!(flag = %flag.key, flag_id = id, "created feature flag");

        Ok(ResourceState::new(id.to_string(), attributes.clone()))
    }

    async fn read(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
    ) -> Result<ResourceState> {
        let config: FeatureConfig = decode_attributes(self.type_name(), &state.attributes)?;
        let declared = config.into_flag()?;

        let mut flag = client.get_flag(declared.project_id, &declared.key).await?;
        flag.variations = client
            .list_variations(declared.project_id, &declared.key)
            .await?;
        flag.environments = client.get_ruleset(&declared).await?;

        Ok(ResourceState::new(state.id.clone(), flag_attributes(&flag)))
    }

    /// Flag identity and variations are immutable upstream; updates rewrite
    /// the rulesets and re-enable them.
    async fn update(
        &self,
        client: &OptimizelyClient,
        state: &ResourceState,
        attributes: &AttributeMap,
    ) -> Result<ResourceState> {
        let config: FeatureConfig = decode_attributes(self.type_name(), attributes)?;
        let flag = config.into_flag()?;

        client.update_ruleset(&flag).await?;
        client.enable_ruleset(&flag).await?;

        Ok(ResourceState::new(state.id.clone(), attributes.clone()))
    }

    async fn delete(&self, client: &OptimizelyClient, state: &ResourceState) -> Result<()> {
        let config: FeatureConfig = decode_attributes(self.type_name(), &state.attributes)?;
        let flag = config.into_flag()?;

        client.disable_ruleset(&flag).await?;
        client.delete_flag(flag.project_id, &flag.key).await?;

        info!(flag = %flag.key, "deleted feature flag");
        Ok(())
    }
}
