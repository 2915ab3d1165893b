// ABOUTME: Flag and variation client tests covering payload transforms and envelopes
// ABOUTME: Pins the variable-definitions map shape and the boxed {"value": ...} encoding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Optimizely Provider Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use std::collections::BTreeMap;

use optimizely_provider::models::{Flag, VariableSchema, Variation};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn sample_flag() -> Flag {
    Flag {
        id: None,
        project_id: 123,
        key: "checkout_redesign".to_string(),
        name: "Checkout redesign".to_string(),
        description: "New checkout flow".to_string(),
        archived: false,
        variables: vec![
            VariableSchema {
                key: "button_color".to_string(),
                kind: "string".to_string(),
                default_value: "black".to_string(),
                archived: false,
            },
            VariableSchema {
                key: "max_items".to_string(),
                kind: "integer".to_string(),
                default_value: "10".to_string(),
                archived: false,
            },
        ],
        variations: Vec::new(),
        environments: BTreeMap::new(),
    }
}

#[tokio::test]
async fn create_flag_maps_variables_by_key() {
    let (server, client) = common::mock_client().await;
    let flag = sample_flag();

    Mock::given(method("POST"))
        .and(path("/flags/v1/projects/123/flags"))
        .and(body_json(json!({
            "key": "checkout_redesign",
            "name": "Checkout redesign",
            "description": "New checkout flow",
            "variable_definitions": {
                "button_color": {
                    "key": "button_color",
                    "type": "string",
                    "default_value": "black",
                    "description": ""
                },
                "max_items": {
                    "key": "max_items",
                    "type": "integer",
                    "default_value": "10",
                    "description": ""
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 77,
            "project_id": 123,
            "key": "checkout_redesign",
            "name": "Checkout redesign",
            "description": "New checkout flow",
            "archived": false,
            "variable_definitions": {
                "button_color": {
                    "key": "button_color",
                    "type": "string",
                    "default_value": "black"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client.create_flag(&flag).await.unwrap();
    assert_eq!(created.id, Some(77));
    assert_eq!(created.key, "checkout_redesign");
    assert_eq!(created.variables.len(), 1);
    assert_eq!(created.variables[0].key, "button_color");
}

#[tokio::test]
async fn get_flag_fetches_by_project_and_key() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("GET"))
        .and(path("/flags/v1/projects/123/flags/checkout_redesign"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 77,
            "project_id": 123,
            "key": "checkout_redesign",
            "name": "Checkout redesign",
            "description": "New checkout flow"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let flag = client.get_flag(123, "checkout_redesign").await.unwrap();
    assert_eq!(flag.id, Some(77));
    assert_eq!(flag.name, "Checkout redesign");
}

#[tokio::test]
async fn delete_flag_issues_delete_by_key() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("DELETE"))
        .and(path("/flags/v1/projects/123/flags/checkout_redesign"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_flag(123, "checkout_redesign").await.unwrap();
}

#[tokio::test]
async fn create_variation_boxes_variable_values() {
    let (server, client) = common::mock_client().await;
    let flag = sample_flag();
    let variation = Variation {
        key: "treatment".to_string(),
        name: "Treatment".to_string(),
        description: String::new(),
        variables: BTreeMap::from([
            ("button_color".to_string(), json!("red")),
            ("max_items".to_string(), json!(25)),
        ]),
    };

    Mock::given(method("POST"))
        .and(path("/flags/v1/projects/123/flags/checkout_redesign/variations"))
        .and(body_json(json!({
            "key": "treatment",
            "name": "Treatment",
            "description": "",
            "variables": {
                "button_color": { "value": "red" },
                "max_items": { "value": 25 }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    client.create_variation(&flag, &variation).await.unwrap();
}

#[tokio::test]
async fn list_variations_unwraps_items_envelope() {
    let (server, client) = common::mock_client().await;

    Mock::given(method("GET"))
        .and(path("/flags/v1/projects/123/flags/checkout_redesign/variations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "key": "treatment",
                    "name": "Treatment",
                    "variables": {
                        "button_color": { "value": "red" }
                    }
                },
                { "key": "control" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let variations = client
        .list_variations(123, "checkout_redesign")
        .await
        .unwrap();
    assert_eq!(variations.len(), 2);
    assert_eq!(variations[0].key, "treatment");
    assert_eq!(variations[0].variables["button_color"], json!("red"));
    assert_eq!(variations[1].key, "control");
    assert!(variations[1].variables.is_empty());
}
