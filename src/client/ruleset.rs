// ABOUTME: Ruleset translation between rollout rules and JSON-Patch operation lists
// ABOUTME: Rule priority is encoded purely by array position in /rule_priorities ops
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{decode, encode, Method, OptimizelyClient};
use crate::errors::{Error, Result};
use crate::models::{audience_ids, Condition, FeatureEnvironment, Flag, RolloutRule};

/// Ruleset type token for rules written by this provider.
const TARGETED_DELIVERY: &str = "targeted_delivery";

/// JSON-Patch operation kind used for ruleset writes.
///
/// Creation uses `add`, updates use `replace`; the op list is otherwise
/// identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert a new rule or priority entry
    Add,
    /// Overwrite an existing rule or priority entry
    Replace,
}

#[derive(Serialize)]
struct PatchOperation {
    op: PatchOp,
    path: String,
    value: Value,
}

/// Wire shape of one rule inside a ruleset.
#[derive(Serialize, Deserialize)]
struct RulesetRule {
    key: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    percentage_included: i64,
    variations: BTreeMap<String, RulesetVariation>,
    audience_conditions: Vec<Condition>,
}

#[derive(Serialize, Deserialize)]
struct RulesetVariation {
    key: String,
    #[serde(default)]
    percentage_included: i64,
}

#[derive(Deserialize)]
struct RulesetResponse {
    #[serde(default)]
    rules: BTreeMap<String, RulesetRule>,
    #[serde(default)]
    rule_priorities: Vec<String>,
}

/// Build the ordered op list for one environment: per rule, one op for the
/// rule body at `/rules/{key}` and one for its priority slot at
/// `/rule_priorities/{index}`.
fn ruleset_ops(environment: &FeatureEnvironment, op: PatchOp) -> Result<Vec<PatchOperation>> {
    let mut ops = Vec::with_capacity(environment.rollout_rules.len() * 2);

    for (index, rule) in environment.rollout_rules.iter().enumerate() {
        let body = RulesetRule {
            key: rule.key.clone(),
            name: rule.key.clone(),
            kind: TARGETED_DELIVERY.to_string(),
            percentage_included: rule.percentage_included,
            variations: BTreeMap::from([(
                rule.deliver.clone(),
                RulesetVariation {
                    key: rule.deliver.clone(),
                    percentage_included: rule.percentage_included,
                },
            )]),
            audience_conditions: rule.audience_conditions.clone(),
        };

        ops.push(PatchOperation {
            op,
            path: format!("/rules/{}", rule.key),
            value: serde_json::to_value(&body).map_err(|source| Error::Encode {
                context: "ruleset",
                source,
            })?,
        });

        ops.push(PatchOperation {
            op,
            path: format!("/rule_priorities/{index}"),
            value: Value::String(rule.key.clone()),
        });
    }

    Ok(ops)
}

impl RulesetResponse {
    /// Invert the wire shape back into ordered rollout rules.
    ///
    /// Rules are ordered by `rule_priorities`; any rule the priority list
    /// does not mention is appended in key order. Percentages stay in the
    /// wire scale, matching [`RolloutRule`]. The deliver value comes from
    /// the rule's variations map, which this provider always writes with
    /// exactly one entry; multi-entry responses keep the last key seen and
    /// are logged for product clarification.
    fn into_environment(mut self, environment: &str) -> FeatureEnvironment {
        let mut ordered = Vec::with_capacity(self.rules.len());

        for key in &self.rule_priorities {
            if let Some(rule) = self.rules.remove(key) {
                ordered.push(rule);
            }
        }
        ordered.extend(self.rules.into_values());

        let rollout_rules = ordered
            .into_iter()
            .map(|rule| {
                if rule.variations.len() > 1 {
                    warn!(
                        environment,
                        rule = %rule.key,
                        count = rule.variations.len(),
                        "ruleset rule has multiple variations; keeping the last key"
                    );
                }
                let deliver = rule
                    .variations
                    .keys()
                    .last()
                    .cloned()
                    .unwrap_or_default();
                let audiences = audience_ids(&rule.audience_conditions);

                RolloutRule {
                    key: rule.key,
                    audience_conditions: Condition::all_of(&audiences),
                    percentage_included: rule.percentage_included,
                    deliver,
                }
            })
            .collect();

        FeatureEnvironment { rollout_rules }
    }
}

impl OptimizelyClient {
    /// Write the rulesets of every environment of a flag with `add` ops.
    pub async fn create_ruleset(&self, flag: &Flag) -> Result<()> {
        self.patch_ruleset(flag, PatchOp::Add).await
    }

    /// Rewrite the rulesets of every environment of a flag with `replace`
    /// ops.
    pub async fn update_ruleset(&self, flag: &Flag) -> Result<()> {
        self.patch_ruleset(flag, PatchOp::Replace).await
    }

    async fn patch_ruleset(&self, flag: &Flag, op: PatchOp) -> Result<()> {
        for (environment, feature_env) in &flag.environments {
            let ops = ruleset_ops(feature_env, op)?;
            debug!(
                flag = %flag.key,
                environment = %environment,
                ops = ops.len(),
                "patching ruleset"
            );

            let body = encode("ruleset", &ops)?;
            let path = format!(
                "flags/v1/projects/{}/flags/{}/environments/{}/ruleset",
                flag.project_id, flag.key, environment
            );
            self.send(Method::PATCH, &path, Some(body)).await?;
        }
        Ok(())
    }

    /// Fetch and invert the ruleset of every environment of a flag.
    ///
    /// Percentages come back untouched in the wire scale, and audience
    /// conditions are flattened to an `"and"` of the audience leaves found
    /// anywhere in the returned tree. Conversion back to configuration
    /// percent happens once, at the resource layer.
    pub async fn get_ruleset(
        &self,
        flag: &Flag,
    ) -> Result<BTreeMap<String, FeatureEnvironment>> {
        let mut environments = BTreeMap::new();

        for environment in flag.environments.keys() {
            let path = format!(
                "flags/v1/projects/{}/flags/{}/environments/{}/ruleset",
                flag.project_id, flag.key, environment
            );
            let bytes = self.send(Method::GET, &path, None).await?;
            let response: RulesetResponse = decode("ruleset", &bytes)?;
            environments.insert(environment.clone(), response.into_environment(environment));
        }

        Ok(environments)
    }

    /// Enable the ruleset of every environment of a flag (bare POST).
    pub async fn enable_ruleset(&self, flag: &Flag) -> Result<()> {
        self.toggle_ruleset(flag, "enabled").await
    }

    /// Disable the ruleset of every environment of a flag (bare POST).
    pub async fn disable_ruleset(&self, flag: &Flag) -> Result<()> {
        self.toggle_ruleset(flag, "disabled").await
    }

    async fn toggle_ruleset(&self, flag: &Flag, state: &str) -> Result<()> {
        for environment in flag.environments.keys() {
            debug!(flag = %flag.key, environment = %environment, state, "toggling ruleset");
            let path = format!(
                "flags/v1/projects/{}/flags/{}/environments/{}/ruleset/{}",
                flag.project_id, flag.key, environment, state
            );
            self.send(Method::POST, &path, None).await?;
        }
        Ok(())
    }
}
