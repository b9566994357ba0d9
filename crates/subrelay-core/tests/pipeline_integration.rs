//! End-to-end tests for the event-to-record pipeline
//!
//! These exercise the full path from a trigger payload through event
//! detection, document parsing, and field mapping. Transport calls are not
//! made; the scenarios here all resolve before (or instead of) the HTTP
//! boundary.

use serde_json::json;
use subrelay_core::{
    map_subscriber, parse_configuration, process_event, BridgeConfig, Error, FieldValue, Snapshot,
    SubscriberClient, SyncOutcome, SyncResponse, TriggerEvent,
};

fn mapping_with_fallbacks() -> String {
    json!({
        "externalId": {"kind": "text", "sourcePath": "name", "targetName": "externalId"},
        "name": {"kind": "text", "sourcePath": "fullName", "targetName": "name", "fallback": ""},
        "email": {"kind": "text", "sourcePath": "email", "targetName": "email", "fallback": ""},
        "phone": {"kind": "text", "sourcePath": "phone", "targetName": "phone", "fallback": ""},
        "metadata": {"kind": "object", "targetName": "metadata", "children": []}
    })
    .to_string()
}

#[test]
fn raw_event_maps_to_subscriber_record() {
    let event = TriggerEvent::from_json(&json!({
        "value": {
            "fields": {
                "name": {"stringValue": "Ann"},
                "age": {"integerValue": "30"}
            }
        }
    }))
    .unwrap();

    let Snapshot::Document(document) = event.snapshot() else {
        panic!("expected a document snapshot");
    };
    assert_eq!(document["age"], FieldValue::Integer(30));

    let configuration = parse_configuration(&mapping_with_fallbacks()).unwrap();
    let subscriber = map_subscriber(&document, &configuration);

    assert_eq!(subscriber.external_id, FieldValue::String("Ann".to_string()));
    assert_eq!(subscriber.name, FieldValue::String("".to_string()));
    assert_eq!(subscriber.email, FieldValue::String("".to_string()));
    assert_eq!(subscriber.phone, FieldValue::String("".to_string()));
    assert_eq!(
        subscriber.metadata,
        FieldValue::Map(Default::default()),
        "no children configured, metadata must be an empty object"
    );
}

#[test]
fn nested_metadata_resolves_against_the_root_document() {
    let configuration = parse_configuration(
        &json!({
            "externalId": {"kind": "text", "sourcePath": "id", "targetName": "externalId"},
            "name": {"kind": "text", "sourcePath": "profile.name", "targetName": "name", "fallback": ""},
            "email": {"kind": "text", "sourcePath": "contact.email", "targetName": "email", "fallback": ""},
            "phone": {"kind": "text", "sourcePath": "contact.phone", "targetName": "phone", "fallback": ""},
            "metadata": {
                "kind": "object",
                "sourcePath": "profile",
                "targetName": "metadata",
                "children": [
                    {"kind": "text", "sourcePath": "profile.plan", "targetName": "plan", "fallback": "free"},
                    {
                        "kind": "object",
                        "sourcePath": "profile.settings",
                        "targetName": "settings",
                        "children": [
                            {"kind": "boolean", "sourcePath": "profile.settings.emailOptIn", "targetName": "emailOptIn", "fallback": false}
                        ]
                    }
                ]
            }
        })
        .to_string(),
    )
    .unwrap();

    let event = TriggerEvent::from_json(&json!({
        "value": {
            "fields": {
                "id": {"stringValue": "u-42"},
                "profile": {"mapValue": {"fields": {
                    "name": {"stringValue": "Ann"},
                    "plan": {"stringValue": "pro"},
                    "settings": {"mapValue": {"fields": {
                        "emailOptIn": {"booleanValue": true}
                    }}}
                }}},
                "contact": {"mapValue": {"fields": {
                    "email": {"stringValue": "ann@example.com"}
                }}}
            }
        }
    }))
    .unwrap();

    let Snapshot::Document(document) = event.snapshot() else {
        panic!("expected a document snapshot");
    };
    let subscriber = map_subscriber(&document, &configuration);

    assert_eq!(subscriber.name, FieldValue::String("Ann".to_string()));
    assert_eq!(
        subscriber.email,
        FieldValue::String("ann@example.com".to_string())
    );
    assert_eq!(subscriber.phone, FieldValue::String("".to_string()));

    let metadata = subscriber.metadata.as_map().unwrap();
    assert_eq!(metadata["plan"], FieldValue::String("pro".to_string()));
    let settings = metadata["settings"].as_map().unwrap();
    assert_eq!(settings["emailOptIn"], FieldValue::Bool(true));
}

#[test]
fn pre_resolved_event_maps_like_a_raw_one() {
    let event = TriggerEvent::from_json(&json!({
        "data": {"after": {"exists": true, "data": {"name": "Ann", "age": 30}}}
    }))
    .unwrap();

    let Snapshot::Document(document) = event.snapshot() else {
        panic!("expected a document snapshot");
    };
    let configuration = parse_configuration(&mapping_with_fallbacks()).unwrap();
    let subscriber = map_subscriber(&document, &configuration);
    assert_eq!(subscriber.external_id, FieldValue::String("Ann".to_string()));
}

#[tokio::test]
async fn deletion_yields_skip_without_transport() {
    let config = BridgeConfig::new("token", mapping_with_fallbacks());
    let client = SubscriberClient::new(&config).unwrap();

    let outcome = process_event(
        &json!({"data": {"after": {"exists": false}}}),
        &config,
        &client,
    )
    .await
    .unwrap();

    assert_eq!(
        outcome,
        SyncOutcome::Skipped {
            reason: "document deleted, no action needed".to_string()
        }
    );

    let response = SyncResponse::from_result(Ok(outcome));
    assert!(response.success);
}

#[tokio::test]
async fn configuration_failures_are_distinguishable_at_the_boundary() {
    let event = json!({"value": {"fields": {"name": {"stringValue": "Ann"}}}});

    let syntax = BridgeConfig::new("token", "{broken");
    let client = SubscriberClient::new(&syntax).unwrap();
    let err = process_event(&event, &syntax, &client).await.unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));

    let mut incomplete: serde_json::Value =
        serde_json::from_str(&mapping_with_fallbacks()).unwrap();
    incomplete.as_object_mut().unwrap().remove("phone");
    let missing = BridgeConfig::new("token", incomplete.to_string());
    let client = SubscriberClient::new(&missing).unwrap();
    let err = process_event(&event, &missing, &client).await.unwrap_err();
    assert!(err.to_string().contains("missing required fields: phone"));
}

#[tokio::test]
async fn unknown_event_shape_folds_into_a_failure_response() {
    let config = BridgeConfig::new("token", mapping_with_fallbacks());
    let client = SubscriberClient::new(&config).unwrap();

    let result = process_event(&json!({"payload": []}), &config, &client).await;
    assert!(matches!(result, Err(Error::Event { .. })));

    let response = SyncResponse::from_result(result);
    assert!(!response.success);
    assert!(response.error.unwrap().contains("invalid event format"));
}
