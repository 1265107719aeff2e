//! The runnable collection.
//!
//! A [`Collection`] is built once from a collection document. Every request
//! it contains, directly or inside a folder, shares the collection's
//! [`SharedEnvironment`]: a variable set by one request's test script is
//! visible to every request called afterwards. Two collections built from the
//! same document never share an environment.
//!
//! Members are addressed by normalized identifier: `get_user` for a request
//! named "Get User", `UserAdmin` for a folder named "user admin".
//!
//! # Example
//!
//! ```
//! use collection_runner::collection::Collection;
//! use collection_runner::executor::RequestError;
//! use collection_runner::models::{HttpResponse, PreparedRequest};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let text = r#"{
//!   "info": {"name": "Demo", "schema": "v2.1.0"},
//!   "item": [{
//!     "name": "Get User",
//!     "event": [{"listen": "test", "script": {"exec": [
//!       "pm.environment.set('user_id', jsonData.id);"
//!     ]}}],
//!     "request": {"url": {"raw": "{{host}}/user"}, "method": "GET", "header": []}
//!   }]
//! }"#;
//!
//! let transport = |_: &PreparedRequest| -> Result<HttpResponse, RequestError> {
//!     Ok(HttpResponse::with_json(&json!({"id": 7})))
//! };
//!
//! let collection = Collection::from_json(text, Arc::new(transport)).unwrap();
//! collection.environments().set("host", "https://api.example.com");
//!
//! collection.request("get_user").unwrap().call().unwrap();
//! assert_eq!(collection.environments().get("USER_ID").unwrap(), json!(7));
//! ```

mod folder;
mod queue;
mod request;
pub mod suggest;

pub use folder::Folder;
pub use queue::ExecutionQueue;
pub use request::Request;

use crate::environment::SharedEnvironment;
use crate::error::Error;
use crate::executor::Transport;
use crate::parser::{
    parse_collection, CollectionDocument, DocumentError, ItemDefinition, RequestDefinition,
    SchemaVersion,
};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Identifier lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{}", unknown_member_message(.name, .container, .suggestion.as_deref(), .candidates))]
    UnknownMember {
        name: String,
        container: String,
        suggestion: Option<String>,
        candidates: Vec<String>,
    },

    /// The identifier names a folder where a request was expected
    #[error("{name} in {container} is a folder, not a request")]
    NotARequest { name: String, container: String },

    /// The identifier names a request where a folder was expected
    #[error("{name} in {container} is a request, not a folder")]
    NotAFolder { name: String, container: String },
}

fn unknown_member_message(
    name: &str,
    container: &str,
    suggestion: Option<&str>,
    candidates: &[String],
) -> String {
    match suggestion {
        Some(suggestion) => format!(
            "{} does not exist in {}. Did you mean {}?",
            name, container, suggestion
        ),
        None => format!(
            "{} does not exist in {}. Your choices are: {}",
            name,
            container,
            candidates.join(", ")
        ),
    }
}

/// Result of an identifier lookup.
#[derive(Debug)]
pub enum Lookup<'a, T> {
    Found(&'a T),
    NotFound {
        /// The closest identifier, if any shares a character with the query
        suggestion: Option<String>,
        /// Every valid identifier
        candidates: Vec<String>,
    },
}

impl<'a, T> Lookup<'a, T> {
    fn missing(name: &str, candidates: Vec<&str>) -> Self {
        Lookup::NotFound {
            suggestion: suggest::closest_match(name, candidates.iter().copied())
                .map(str::to_string),
            candidates: candidates.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn found(self) -> Option<&'a T> {
        match self {
            Lookup::Found(member) => Some(member),
            Lookup::NotFound { .. } => None,
        }
    }

    /// Converts a miss into [`LookupError::UnknownMember`]
    pub fn into_result(self, name: &str, container: &str) -> Result<&'a T, LookupError> {
        match self {
            Lookup::Found(member) => Ok(member),
            Lookup::NotFound {
                suggestion,
                candidates,
            } => Err(LookupError::UnknownMember {
                name: name.to_string(),
                container: container.to_string(),
                suggestion,
                candidates,
            }),
        }
    }
}

/// A top-level member of a collection.
#[derive(Debug, Clone)]
pub enum Node {
    Request(Request),
    Folder(Folder),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Request(request) => request.name(),
            Node::Folder(folder) => folder.name(),
        }
    }

    pub fn as_request(&self) -> Option<&Request> {
        match self {
            Node::Request(request) => Some(request),
            Node::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::Request(_) => None,
        }
    }
}

/// A collection of requests and folders sharing one environment.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    version: Option<SchemaVersion>,
    nodes: Vec<Node>,
    environment: SharedEnvironment,
}

impl Collection {
    /// Builds a collection from a parsed document, with a fresh empty
    /// environment.
    pub fn new(document: CollectionDocument, transport: Arc<dyn Transport>) -> Self {
        let environment = SharedEnvironment::new();
        let build_request = |definition: RequestDefinition| {
            Request::new(
                definition.name,
                definition.events,
                definition.template,
                environment.clone(),
                transport.clone(),
            )
        };

        let mut nodes: Vec<Node> = Vec::with_capacity(document.items.len());
        for item in document.items {
            let node = match item {
                ItemDefinition::Request(definition) => Node::Request(build_request(definition)),
                ItemDefinition::Folder(definition) => Node::Folder(Folder::new(
                    definition.name,
                    definition.requests.into_iter().map(&build_request).collect(),
                )),
            };

            match nodes.iter_mut().find(|n| n.name() == node.name()) {
                Some(existing) => {
                    log::warn!(
                        "Duplicate identifier `{}` in collection `{}`; keeping the last definition",
                        node.name(),
                        document.name
                    );
                    *existing = node;
                }
                None => nodes.push(node),
            }
        }

        log::debug!(
            "Built collection `{}` with {} member(s)",
            document.name,
            nodes.len()
        );

        Self {
            name: document.name,
            version: document.version,
            nodes,
            environment,
        }
    }

    /// Parses `text` and builds a collection.
    pub fn from_json(text: &str, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        let document = parse_collection(text)?;
        Ok(Self::new(document, transport))
    }

    /// Reads and parses a collection document file.
    pub fn from_path(path: &Path, transport: Arc<dyn Transport>) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(DocumentError::from)?;
        Self::from_json(&text, transport)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema version from `info.schema`, if it carried one
    pub fn version(&self) -> Option<SchemaVersion> {
        self.version
    }

    /// The environment shared by every request in this collection
    pub fn environments(&self) -> &SharedEnvironment {
        &self.environment
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Finds a top-level member by identifier, suggesting the closest one
    /// on a miss.
    pub fn lookup(&self, name: &str) -> Lookup<'_, Node> {
        match self.nodes.iter().find(|n| n.name() == name) {
            Some(node) => Lookup::Found(node),
            None => Lookup::missing(name, self.nodes.iter().map(Node::name).collect()),
        }
    }

    pub fn get(&self, name: &str) -> Result<&Node, LookupError> {
        self.lookup(name).into_result(name, &self.name)
    }

    /// Finds a top-level request
    pub fn request(&self, name: &str) -> Result<&Request, LookupError> {
        self.get(name)?
            .as_request()
            .ok_or_else(|| LookupError::NotARequest {
                name: name.to_string(),
                container: self.name.clone(),
            })
    }

    /// Finds a folder
    pub fn folder(&self, name: &str) -> Result<&Folder, LookupError> {
        self.get(name)?
            .as_folder()
            .ok_or_else(|| LookupError::NotAFolder {
                name: name.to_string(),
                container: self.name.clone(),
            })
    }

    /// Dotted identifiers of every request, in document order
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers = Vec::new();
        for node in &self.nodes {
            match node {
                Node::Request(request) => identifiers.push(request.name().to_string()),
                Node::Folder(folder) => identifiers.extend(
                    folder
                        .identifiers()
                        .into_iter()
                        .map(|id| format!("{}.{}", folder.name(), id)),
                ),
            }
        }
        identifiers
    }

    /// Builds a queue from identifiers. A folder identifier contributes all
    /// of its requests; `Folder.request` picks a single one.
    pub fn queue<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<ExecutionQueue, LookupError> {
        let mut requests = Vec::new();
        for identifier in identifiers {
            let identifier = identifier.as_ref();
            match identifier.split_once('.') {
                Some((folder, request)) => {
                    requests.push(self.folder(folder)?.request(request)?.clone());
                }
                None => match self.get(identifier)? {
                    Node::Request(request) => requests.push(request.clone()),
                    Node::Folder(folder) => requests.extend(folder.requests().iter().cloned()),
                },
            }
        }
        Ok(ExecutionQueue::new(requests))
    }

    /// Runs the identified requests through an [`ExecutionQueue`] and returns
    /// the decoded body of the last one run.
    pub fn run_in_queue<S: AsRef<str>>(&self, identifiers: &[S]) -> Result<Option<Value>, Error> {
        self.queue(identifiers)?.run()
    }

    /// One line per callable identifier
    pub fn help(&self) -> String {
        self.identifiers()
            .iter()
            .map(|id| format!("collection.{}()", id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
