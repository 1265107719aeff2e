//! Collection-level integration tests
//!
//! These tests build collections from a full document and verify request
//! chaining through the shared environment, lookup diagnostics and loading
//! from disk.

use super::{init_test_env, login_body, RecordingTransport, CHAINED_COLLECTION, HOST};
use collection_runner::environment::load_environment_file;
use collection_runner::{Collection, Error, LookupError, VarError};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn login_url() -> String {
    format!("{}/login", HOST)
}

fn chained(transport: &std::sync::Arc<RecordingTransport>) -> Collection {
    let collection = Collection::from_json(CHAINED_COLLECTION, transport.clone()).unwrap();
    collection
        .environments()
        .update([("host", HOST), ("password", "hunter2"), ("sku", "A-1")]);
    collection
}

#[test]
fn test_test_script_token_is_visible_to_later_requests() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);

    collection.request("log_in").unwrap().call().unwrap();

    assert_eq!(collection.environments().get("token").unwrap(), json!("tok-123"));
    assert_eq!(collection.environments().get("USER_ID").unwrap(), json!(7));

    let orders = collection.folder("Orders").unwrap();
    orders.request("list_orders").unwrap().call().unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].url, login_url());
    assert_eq!(
        sent[0].json,
        Some(json!({"user": "ada", "password": "hunter2"}))
    );
    assert_eq!(sent[1].url, "https://shop.test/users/7/orders");
    assert_eq!(sent[1].header("authorization"), Some("Bearer tok-123"));
}

#[test]
fn test_independent_collections_do_not_share_environment() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let first = chained(&transport);
    let second = chained(&transport);

    first.request("log_in").unwrap().call().unwrap();

    assert!(first.environments().contains("token"));
    assert!(!second.environments().contains("token"));

    let result = second
        .folder("Orders")
        .unwrap()
        .request("list_orders")
        .unwrap()
        .call();
    assert!(matches!(
        result,
        Err(Error::Variable(VarError::MissingVariable { ref name, .. })) if name == "user_id"
    ));
}

#[test]
fn test_pre_request_binding_does_not_leak() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);

    collection.request("log_in").unwrap().call().unwrap();

    // "user" only ever lived in the per-call copy
    assert!(!collection.environments().contains("user"));
}

#[test]
fn test_overrides_win_for_one_call() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);
    let login = collection.request("log_in").unwrap();

    login
        .call_with([("user", json!("grace")), ("Host", json!("https://staging.test"))])
        .unwrap();
    login.call().unwrap();

    let sent = transport.sent();
    assert_eq!(sent[0].url, "https://staging.test/login");
    assert_eq!(sent[0].json.as_ref().unwrap()["user"], json!("grace"));
    assert_eq!(sent[1].url, login_url());
    assert_eq!(sent[1].json.as_ref().unwrap()["user"], json!("ada"));
}

#[test]
fn test_missing_variable_lists_available_keys() {
    init_test_env();
    let collection = Collection::from_json(CHAINED_COLLECTION, RecordingTransport::new()).unwrap();
    collection.environments().set("password", "x");

    let err = collection.request("log_in").unwrap().call().unwrap_err();
    match err {
        Error::Variable(VarError::MissingVariable { name, available }) => {
            assert_eq!(name, "host");
            assert_eq!(available, vec!["PASSWORD".to_string(), "USER".to_string()]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_unknown_member_suggestion() {
    init_test_env();
    let collection = Collection::from_json(CHAINED_COLLECTION, RecordingTransport::new()).unwrap();

    let err = collection.request("log_inn").unwrap_err();
    assert!(matches!(
        &err,
        LookupError::UnknownMember { suggestion: Some(s), .. } if s == "log_in"
    ));
    assert_eq!(
        err.to_string(),
        "log_inn does not exist in Shop API. Did you mean log_in?"
    );
}

#[test]
fn test_unknown_member_lists_choices_without_a_match() {
    init_test_env();
    let collection = Collection::from_json(CHAINED_COLLECTION, RecordingTransport::new()).unwrap();

    let err = collection.get("xyz").unwrap_err();
    match err {
        LookupError::UnknownMember {
            suggestion,
            candidates,
            ..
        } => {
            assert_eq!(suggestion, None);
            assert_eq!(candidates, vec!["log_in", "Orders", "health_check"]);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_introspection() {
    init_test_env();
    let collection = Collection::from_json(CHAINED_COLLECTION, RecordingTransport::new()).unwrap();

    assert_eq!(collection.name(), "Shop API");
    assert_eq!(collection.version().unwrap().to_string(), "v2.1.0");
    assert_eq!(
        collection.help(),
        "collection.log_in()\n\
         collection.Orders.list_orders()\n\
         collection.Orders.create_order()\n\
         collection.health_check()"
    );
}

#[test]
fn test_load_collection_and_environment_from_disk() {
    init_test_env();
    let dir = TempDir::new().unwrap();
    let collection_path = dir.path().join("shop.postman_collection.json");
    let environment_path = dir.path().join("shop.postman_environment.json");
    fs::write(&collection_path, CHAINED_COLLECTION).unwrap();
    fs::write(
        &environment_path,
        r#"{
            "name": "Local",
            "values": [
                {"key": "host", "value": "https://shop.test", "enabled": true},
                {"key": "password", "value": "hunter2"},
                {"key": "sku", "value": "disabled", "enabled": false}
            ]
        }"#,
    )
    .unwrap();

    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = Collection::from_path(&collection_path, transport.clone()).unwrap();
    collection
        .environments()
        .update(load_environment_file(&environment_path).unwrap());

    assert!(!collection.environments().contains("sku"));
    collection.request("log_in").unwrap().call().unwrap();
    assert_eq!(transport.urls(), vec![login_url()]);
}

#[test]
fn test_invalid_document_is_rejected() {
    init_test_env();
    let result = Collection::from_json(r#"{"info": {"name": "x"}}"#, RecordingTransport::new());
    assert!(matches!(result, Err(Error::Document(_))));
}
