// ABOUTME: Tagged audience-condition tree replacing the original ad hoc heterogeneous list
// ABOUTME: Serializes untagged so the wire keeps its ["and", {"audience_id": N}] shape
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

use serde::{Deserialize, Serialize};

/// One node of an audience-condition tree.
///
/// On the wire a condition list mixes bare operator tokens, audience leaf
/// objects, and nested lists: `["and", {"audience_id": 1}, ["or", ...]]`.
/// The untagged representation keeps that shape while giving decode-side
/// code an explicit variant to match on instead of probing map shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Condition {
    /// Boolean operator token such as `"and"`
    Operator(ConditionOperator),
    /// Leaf referencing an audience by id
    Audience(AudienceCondition),
    /// Nested condition list
    Group(Vec<Condition>),
}

/// Boolean operators accepted by the vendor API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionOperator {
    /// All child conditions must match
    And,
    /// Any child condition may match
    Or,
    /// Negation
    Not,
}

/// Condition leaf targeting a single audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceCondition {
    /// Audience id the rule targets
    pub audience_id: i64,
}

impl Condition {
    /// The `"and"` operator token.
    #[must_use]
    pub fn and() -> Self {
        Self::Operator(ConditionOperator::And)
    }

    /// An audience leaf.
    #[must_use]
    pub fn audience(audience_id: i64) -> Self {
        Self::Audience(AudienceCondition { audience_id })
    }

    /// Build the condition list for a list of audience ids: the `"and"`
    /// token followed by one leaf per id.
    #[must_use]
    pub fn all_of(audience_ids: &[i64]) -> Vec<Self> {
        let mut conditions = Vec::with_capacity(audience_ids.len() + 1);
        conditions.push(Self::and());
        conditions.extend(audience_ids.iter().copied().map(Self::audience));
        conditions
    }
}

/// Flatten a condition tree into the audience ids it references, ignoring
/// operator tokens and preserving encounter order.
#[must_use]
pub fn audience_ids(conditions: &[Condition]) -> Vec<i64> {
    let mut ids = Vec::new();
    collect_audience_ids(conditions, &mut ids);
    ids
}

fn collect_audience_ids(conditions: &[Condition], ids: &mut Vec<i64>) {
    for condition in conditions {
        match condition {
            Condition::Operator(_) => {}
            Condition::Audience(leaf) => ids.push(leaf.audience_id),
            Condition::Group(children) => collect_audience_ids(children, ids),
        }
    }
}
