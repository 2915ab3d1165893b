// ABOUTME: Feature flag aggregate: variable schema, variations, and per-environment rollouts
// ABOUTME: Wire payload shapes live next to the clients; these are the domain types
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Condition;

/// A feature toggle with variable definitions, variations, and rollout
/// configuration per environment.
///
/// Flag identity fields are immutable after creation; there is no
/// update-flag-metadata API call. Variations and rulesets are created in
/// separate, non-atomic calls after the flag itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flag {
    /// Vendor-assigned id, absent until created
    pub id: Option<i64>,
    /// Owning project
    pub project_id: i64,
    /// Flag key, unique within the project
    pub key: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Soft-delete marker
    pub archived: bool,
    /// Variable definitions in declaration order
    pub variables: Vec<VariableSchema>,
    /// Variations in declaration order
    pub variations: Vec<Variation>,
    /// Rollout rules keyed by environment name
    pub environments: BTreeMap<String, FeatureEnvironment>,
}

/// Definition of one flag variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableSchema {
    /// Variable key
    pub key: String,
    /// Value type ("string", "boolean", "integer", "double", "json")
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value, kept as a string like the vendor API does
    pub default_value: String,
    /// Soft-delete marker
    #[serde(default)]
    pub archived: bool,
}

/// A named bundle of variable value overrides deliverable by a rule.
///
/// Variations can only be created; the vendor API offers no update or
/// delete operation for them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variation {
    /// Variation key
    pub key: String,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    /// Raw variable values keyed by variable key
    pub variables: BTreeMap<String, Value>,
}

/// Ordered rollout rules for one environment of one flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureEnvironment {
    /// Rules in priority order
    pub rollout_rules: Vec<RolloutRule>,
}

/// A single targeting condition plus delivery percentage plus target
/// variation.
///
/// `percentage_included` is stored in hundredths of a percent, the wire
/// scale; use [`super::percent_to_wire`] and [`super::wire_to_percent`]
/// when crossing the configuration boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolloutRule {
    /// Rule key, unique within the ruleset
    pub key: String,
    /// Audience-condition tree this rule targets
    pub audience_conditions: Vec<Condition>,
    /// Delivery percentage in hundredths of a percent
    pub percentage_included: i64,
    /// Key of the variation this rule delivers
    pub deliver: String,
}
