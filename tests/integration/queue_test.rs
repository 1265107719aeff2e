//! Execution queue integration tests
//!
//! These tests verify run order, result selection and abort behavior for
//! queues built from collection identifiers.

use super::{init_test_env, login_body, RecordingTransport, CHAINED_COLLECTION, HOST};
use collection_runner::{Collection, Error, ExecutionQueue, HttpResponse, PreparedRequest};
use collection_runner::{RequestError, RequestTemplate, SharedEnvironment, Transport};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn chained(transport: &Arc<RecordingTransport>) -> Collection {
    let collection = Collection::from_json(CHAINED_COLLECTION, transport.clone()).unwrap();
    collection
        .environments()
        .update([("host", HOST), ("password", "hunter2"), ("sku", "A-1")]);
    collection
}

#[test]
fn test_queue_runs_in_reverse_and_returns_first_listed_body() {
    init_test_env();
    let transport = RecordingTransport::new();
    let env = SharedEnvironment::new();
    let request = |name: &str| {
        collection_runner::Request::new(
            name,
            Vec::new(),
            RequestTemplate::new("GET", format!("https://q.test/{}", name)),
            env.clone(),
            transport.clone(),
        )
    };

    let queue = ExecutionQueue::new(vec![request("A"), request("B"), request("C")]);
    let result = queue.run().unwrap();

    assert_eq!(
        transport.urls(),
        vec!["https://q.test/C", "https://q.test/B", "https://q.test/A"]
    );
    assert_eq!(result, Some(json!({"url": "https://q.test/A"})));
}

#[test]
fn test_login_listed_last_runs_first() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);

    let body = collection
        .run_in_queue(&["Orders.list_orders", "log_in"])
        .unwrap();

    assert_eq!(
        transport.urls(),
        vec![
            "https://shop.test/login".to_string(),
            "https://shop.test/users/7/orders".to_string()
        ]
    );
    assert_eq!(body, Some(json!({"url": "https://shop.test/users/7/orders"})));
}

#[test]
fn test_folder_call_runs_its_requests() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);
    collection.request("log_in").unwrap().call().unwrap();

    let body = collection.folder("Orders").unwrap().call().unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1].url, "https://shop.test/orders");
    assert_eq!(sent[1].json, Some(json!({"items": [{"sku": "A-1", "qty": 1}]})));
    assert_eq!(sent[2].url, "https://shop.test/users/7/orders");
    assert_eq!(body, Some(json!({"url": "https://shop.test/users/7/orders"})));
}

#[test]
fn test_failure_aborts_without_rollback() {
    init_test_env();
    let transport = RecordingTransport::with_bodies([("https://shop.test/login", login_body())]);
    let collection = chained(&transport);
    collection.environments().write().remove("sku");

    // Runs log_in, then create_order fails to render, so health_check never runs
    let result = collection.run_in_queue(&["health_check", "Orders.create_order", "log_in"]);

    assert!(matches!(result, Err(Error::Variable(_))));
    assert_eq!(transport.urls(), vec!["https://shop.test/login".to_string()]);
    assert_eq!(
        collection.environments().get("token").unwrap(),
        json!("tok-123")
    );
}

#[test]
fn test_transport_failure_aborts_queue() {
    init_test_env();
    let calls = Arc::new(Mutex::new(0usize));
    let counter = calls.clone();
    let transport: Arc<dyn Transport> = Arc::new(
        move |_: &PreparedRequest| -> Result<HttpResponse, RequestError> {
            *counter.lock().unwrap() += 1;
            Err(RequestError::Timeout)
        },
    );
    let collection = Collection::from_json(CHAINED_COLLECTION, transport).unwrap();
    collection.environments().set("host", HOST);

    let result = collection.run_in_queue(&["health_check", "health_check"]);

    assert!(matches!(result, Err(Error::Transport(RequestError::Timeout))));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_empty_queue_returns_nothing() {
    init_test_env();
    let collection = chained(&RecordingTransport::new());
    let none: [&str; 0] = [];
    assert_eq!(collection.run_in_queue(&none).unwrap(), None);
}

#[test]
fn test_unknown_identifier_fails_before_running() {
    init_test_env();
    let transport = RecordingTransport::new();
    let collection = chained(&transport);

    let result = collection.run_in_queue(&["log_in", "Orders.refund"]);

    assert!(matches!(result, Err(Error::Lookup(_))));
    assert!(transport.sent().is_empty());
}
