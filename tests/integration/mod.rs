//! Integration tests module for the collection runner
//!
//! Shared fixtures: a transport stub that records every request it is sent
//! and answers from a per-URL table, and a small collection document that
//! chains a login token into later requests.

pub mod collection_test;
pub mod queue_test;

use collection_runner::{HttpResponse, PreparedRequest, RequestError, Transport};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Records requests and answers with canned JSON bodies keyed by URL.
///
/// URLs without a canned body get `{"url": <url>}`.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<PreparedRequest>>,
    bodies: HashMap<String, Value>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_bodies<I>(bodies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = (&'static str, Value)>,
    {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            bodies: bodies
                .into_iter()
                .map(|(url, body)| (url.to_string(), body))
                .collect(),
        })
    }

    pub fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.sent().into_iter().map(|r| r.url).collect()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: &PreparedRequest) -> Result<HttpResponse, RequestError> {
        self.sent.lock().unwrap().push(request.clone());
        let body = self
            .bodies
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| json!({ "url": request.url }));
        Ok(HttpResponse::with_json(&body))
    }
}

/// A login request whose test script stores the token, an authenticated
/// folder, and a request outside the folder.
pub const CHAINED_COLLECTION: &str = r#"{
  "info": {
    "name": "Shop API",
    "schema": "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
  },
  "item": [
    {
      "name": "Log In",
      "event": [
        {
          "listen": "prerequest",
          "script": {"exec": ["pm.environment.set(\"user\", \"ada\");"]}
        },
        {
          "listen": "test",
          "script": {
            "exec": [
              "var jsonData = pm.response.json();",
              "pm.environment.set(\"token\", jsonData.token);",
              "pm.environment.set(\"user_id\", jsonData.user.id);"
            ]
          }
        }
      ],
      "request": {
        "method": "POST",
        "url": {"raw": "{{host}}/login"},
        "header": [{"key": "Content-Type", "value": "application/json"}],
        "body": {"mode": "raw", "raw": "{\"user\": \"{{user}}\", \"password\": \"{{password}}\"}"}
      }
    },
    {
      "name": "Orders",
      "item": [
        {
          "name": "List Orders",
          "request": {
            "method": "GET",
            "url": "{{host}}/users/{{user_id}}/orders",
            "header": [{"key": "Authorization", "value": "Bearer {{token}}"}]
          }
        },
        {
          "name": "Create Order",
          "request": {
            "method": "POST",
            "url": "{{host}}/orders",
            "header": [{"key": "Authorization", "value": "Bearer {{token}}"}],
            "body": {"mode": "raw", "raw": "{\"items\": [{\"sku\": \"{{sku}}\", \"qty\": 1}]}"}
          }
        }
      ]
    },
    {
      "name": "Health Check",
      "request": {"method": "GET", "url": "{{host}}/health"}
    }
  ]
}"#;

pub const HOST: &str = "https://shop.test";

/// Canned login response for [`CHAINED_COLLECTION`]
pub fn login_body() -> Value {
    json!({"token": "tok-123", "user": {"id": 7}})
}
