//! Collection Runner
//!
//! Loads an API collection document (requests grouped into folders, each
//! with optional pre-request and test scripts) and runs its requests against
//! a pluggable HTTP transport, chaining values between requests through a
//! shared environment.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - **parser**: Reads collection documents into request definitions
//! - **models**: Request templates, prepared requests and responses
//! - **environment**: The case-insensitive variable store shared per collection
//! - **variables**: `{{placeholder}}` rendering through nested JSON
//! - **scripts**: Extracts variable bindings from pre-request and test scripts
//! - **collection**: Collections, folders, callable requests and the execution queue
//! - **executor**: The transport seam, plus a `reqwest` transport behind the `http` feature
//! - **config**: Global runner configuration
//!
//! # Request Invocation
//!
//! Calling a request:
//! 1. Copies the collection environment
//! 2. Merges pre-request script bindings, then caller overrides, into the copy
//! 3. Renders the request template against the copy
//! 4. Sends it through the transport
//! 5. Resolves test script bindings against the response and writes them to
//!    the shared environment
//!
//! # Usage
//!
//! ```no_run
//! use collection_runner::{Collection, HttpResponse, PreparedRequest, RequestError};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let transport = |request: &PreparedRequest| -> Result<HttpResponse, RequestError> {
//!     println!("{} {}", request.method, request.url);
//!     Ok(HttpResponse::new(200, "OK".to_string()))
//! };
//!
//! let collection = Collection::from_path(Path::new("api.json"), Arc::new(transport))?;
//! collection.environments().set("host", "https://api.example.com");
//!
//! let body = collection.run_in_queue(&["Auth", "get_user"])?;
//! println!("{:?}", body);
//! # Ok::<(), collection_runner::Error>(())
//! ```

pub mod collection;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod models;
pub mod parser;
pub mod scripts;
pub mod variables;

pub use collection::{Collection, ExecutionQueue, Folder, Lookup, LookupError, Node, Request};
pub use environment::{EnvironmentStore, SharedEnvironment};
pub use error::{Error, Result};
pub use executor::{RequestError, Transport};
pub use models::{HttpResponse, PreparedRequest, RequestTemplate};
pub use parser::{parse_collection, DocumentError, SchemaVersion};
pub use scripts::ScriptError;
pub use variables::VarError;

#[cfg(feature = "http")]
pub use executor::HttpTransport;
