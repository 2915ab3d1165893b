// ABOUTME: Domain models mirroring the Optimizely feature-management entities
// ABOUTME: Audiences, flags, variations, rollout rules, and condition trees
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors

mod audience;
mod condition;
mod flag;

pub use audience::Audience;
pub use condition::{audience_ids, AudienceCondition, Condition, ConditionOperator};
pub use flag::{FeatureEnvironment, Flag, RolloutRule, VariableSchema, Variation};

/// Scale between configuration-level percent and the wire representation.
///
/// The API stores delivery percentages in hundredths of a percent: a
/// configured 75% travels as 7500. Both directions must round-trip exactly.
pub const PERCENT_SCALE: i64 = 100;

/// Convert a configured percent in `[0, 100]` to the wire value.
#[must_use]
pub fn percent_to_wire(percent: i64) -> i64 {
    percent * PERCENT_SCALE
}

/// Convert a wire value in hundredths of a percent back to percent.
#[must_use]
pub fn wire_to_percent(value: i64) -> i64 {
    value / PERCENT_SCALE
}
