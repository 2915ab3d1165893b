// ABOUTME: Ruleset client tests for JSON-Patch writes, inversion on read, and toggles
// ABOUTME: Pins op counts, ordering, percentage scaling, and the enable/disable POSTs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::BTreeMap;

use optimizely_provider::models::{
    audience_ids, Condition, FeatureEnvironment, Flag, RolloutRule,
};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn flag_with_environments() -> Flag {
    let beta = RolloutRule {
        key: "beta-users".to_string(),
        audience_conditions: Condition::all_of(&[11]),
        percentage_included: 5000,
        deliver: "on".to_string(),
    };
    let everyone = RolloutRule {
        key: "everyone".to_string(),
        audience_conditions: Condition::all_of(&[22]),
        percentage_included: 10000,
        deliver: "off".to_string(),
    };

    Flag {
        id: Some(77),
        project_id: 123,
        key: "checkout_redesign".to_string(),
        name: "Checkout redesign".to_string(),
        description: String::new(),
        archived: false,
        variables: Vec::new(),
        variations: Vec::new(),
        environments: BTreeMap::from([
            (
                "prod".to_string(),
                FeatureEnvironment {
                    rollout_rules: vec![beta.clone(), everyone],
                },
            ),
            (
                "staging".to_string(),
                FeatureEnvironment {
                    rollout_rules: vec![beta],
                },
            ),
        ]),
    }
}

#[tokio::test]
async fn create_ruleset_patches_two_ops_per_rule_per_environment() {
    let (server, client) = common::mock_client().await;
    let flag = flag_with_environments();

    for environment in ["prod", "staging"] {
        Mock::given(method("PATCH"))
            .and(path(format!(
                "/flags/v1/projects/123/flags/checkout_redesign/environments/{environment}/ruleset"
            )))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;
    }

    client.create_ruleset(&flag).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let prod_body: Value = requests
        .iter()
        .find(|r| r.url.path().contains("/environments/prod/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();
    let staging_body: Value = requests
        .iter()
        .find(|r| r.url.path().contains("/environments/staging/"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();

    // Two rules in prod, one in staging: 2x ops each, declaration order.
    let prod_ops = prod_body.as_array().unwrap();
    assert_eq!(prod_ops.len(), 4);
    assert_eq!(prod_ops[0]["op"], "add");
    assert_eq!(prod_ops[0]["path"], "/rules/beta-users");
    assert_eq!(prod_ops[0]["value"]["type"], "targeted_delivery");
    assert_eq!(prod_ops[0]["value"]["percentage_included"], 5000);
    assert_eq!(
        prod_ops[0]["value"]["variations"],
        json!({ "on": { "key": "on", "percentage_included": 5000 } })
    );
    assert_eq!(prod_ops[1]["path"], "/rule_priorities/0");
    assert_eq!(prod_ops[1]["value"], "beta-users");
    assert_eq!(prod_ops[2]["path"], "/rules/everyone");
    assert_eq!(prod_ops[3]["path"], "/rule_priorities/1");
    assert_eq!(prod_ops[3]["value"], "everyone");

    assert_eq!(staging_body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_ruleset_uses_replace_ops() {
    let (server, client) = common::mock_client().await;
    let mut flag = flag_with_environments();
    flag.environments.remove("staging");

    Mock::given(method("PATCH"))
        .and(path(
            "/flags/v1/projects/123/flags/checkout_redesign/environments/prod/ruleset",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client.update_ruleset(&flag).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    for op in body.as_array().unwrap() {
        assert_eq!(op["op"], "replace");
    }
}

#[tokio::test]
async fn get_ruleset_reconstructs_rules_and_audiences() {
    let (server, client) = common::mock_client().await;
    let mut flag = flag_with_environments();
    flag.environments.remove("staging");

    Mock::given(method("GET"))
        .and(path(
            "/flags/v1/projects/123/flags/checkout_redesign/environments/prod/ruleset",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rules": {
                "everyone": {
                    "key": "everyone",
                    "name": "everyone",
                    "type": "targeted_delivery",
                    "percentage_included": 10000,
                    "variations": { "off": { "key": "off", "percentage_included": 10000 } },
                    "audience_conditions": ["and", { "audience_id": 22 }]
                },
                "beta-users": {
                    "key": "beta-users",
                    "name": "beta-users",
                    "type": "targeted_delivery",
                    "percentage_included": 5000,
                    "variations": { "on": { "key": "on", "percentage_included": 5000 } },
                    "audience_conditions": ["and", { "audience_id": 11 }]
                }
            },
            "rule_priorities": ["beta-users", "everyone"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let environments = client.get_ruleset(&flag).await.unwrap();
    let prod = &environments["prod"];

    let keys: Vec<&str> = prod
        .rollout_rules
        .iter()
        .map(|rule| rule.key.as_str())
        .collect();
    assert_eq!(keys, vec!["beta-users", "everyone"]);

    assert_eq!(prod.rollout_rules[0].deliver, "on");
    assert_eq!(prod.rollout_rules[0].percentage_included, 5000);
    assert_eq!(audience_ids(&prod.rollout_rules[0].audience_conditions), vec![11]);
    assert_eq!(prod.rollout_rules[1].percentage_included, 10000);
    assert_eq!(audience_ids(&prod.rollout_rules[1].audience_conditions), vec![22]);
}

#[tokio::test]
async fn enable_and_disable_post_bare_toggles_per_environment() {
    let (server, client) = common::mock_client().await;
    let flag = flag_with_environments();

    for environment in ["prod", "staging"] {
        for state in ["enabled", "disabled"] {
            Mock::given(method("POST"))
                .and(path(format!(
                    "/flags/v1/projects/123/flags/checkout_redesign/environments/{environment}/ruleset/{state}"
                )))
                .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
                .expect(1)
                .mount(&server)
                .await;
        }
    }

    client.enable_ruleset(&flag).await.unwrap();
    client.disable_ruleset(&flag).await.unwrap();

    for request in server.received_requests().await.unwrap() {
        assert!(request.body.is_empty());
    }
}
