//! Collection document parser.
//!
//! This module turns the text of a Postman-style collection document into
//! request definitions. Top-level items are either requests or folders of
//! requests; folders nest exactly one level deep.
//!
//! The parser produces plain data. Linking definitions to a shared
//! environment and a transport is done by [`crate::collection::Collection`].

pub mod document;
pub mod error;
pub mod names;

pub use error::DocumentError;

use crate::models::RequestTemplate;
use crate::scripts::{ScriptEvent, Trigger};
use document::{RawCollection, RawEvent, RawItem, RawRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Matches a `v<major>.<minor>.<patch>` token in `info.schema`.
static SCHEMA_VERSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"v(\d+)\.(\d+)\.(\d+)").expect("Failed to compile schema version regex")
});

/// Collection schema version, e.g. `v2.1.0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SchemaVersion {
    /// Finds the first version token in a schema URL
    ///
    /// # Examples
    ///
    /// ```
    /// use collection_runner::parser::SchemaVersion;
    ///
    /// let url = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
    /// let version = SchemaVersion::from_schema(url).unwrap();
    /// assert_eq!((version.major, version.minor, version.patch), (2, 1, 0));
    /// assert!(SchemaVersion::from_schema("no version here").is_none());
    /// ```
    pub fn from_schema(schema: &str) -> Option<Self> {
        let captures = SCHEMA_VERSION_REGEX.captures(schema)?;
        let part = |i: usize| captures.get(i)?.as_str().parse::<u32>().ok();

        Some(Self {
            major: part(1)?,
            minor: part(2)?,
            patch: part(3)?,
        })
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// A parsed collection document
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDocument {
    /// Collection name from `info.name`
    pub name: String,
    /// Schema version from `info.schema`, if one is present
    pub version: Option<SchemaVersion>,
    /// Top-level items in document order
    pub items: Vec<ItemDefinition>,
}

/// A top-level item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemDefinition {
    Request(RequestDefinition),
    Folder(FolderDefinition),
}

/// A request as described by the document
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDefinition {
    /// Name as written in the document
    pub name: String,
    /// Attached scripts in document order
    pub events: Vec<ScriptEvent>,
    /// Request template
    pub template: RequestTemplate,
}

/// A folder as described by the document
#[derive(Debug, Clone, PartialEq)]
pub struct FolderDefinition {
    /// Name as written in the document
    pub name: String,
    /// Requests in document order
    pub requests: Vec<RequestDefinition>,
}

/// Parses a collection document from JSON text.
///
/// # Errors
///
/// [`DocumentError::Invalid`] if the text is not JSON or a required field
/// (`info.name`, `item`, an item's `name`, a request's `url` or `method`) is
/// missing; [`DocumentError::UnknownItem`] for an item that is neither a
/// request nor a folder.
///
/// # Examples
///
/// ```
/// use collection_runner::parser::{parse_collection, ItemDefinition};
///
/// let text = r#"{
///   "info": {"name": "Demo", "schema": "https://schema.getpostman.com/json/collection/v2.1.0/"},
///   "item": [
///     {"name": "Ping", "request": {"url": {"raw": "{{host}}/ping"}, "method": "GET", "header": []}}
///   ]
/// }"#;
///
/// let document = parse_collection(text).unwrap();
/// assert_eq!(document.name, "Demo");
/// assert!(matches!(&document.items[0], ItemDefinition::Request(r) if r.name == "Ping"));
/// ```
pub fn parse_collection(text: &str) -> Result<CollectionDocument, DocumentError> {
    let raw: RawCollection = serde_json::from_str(text)?;

    let items = raw
        .item
        .into_iter()
        .map(parse_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CollectionDocument {
        version: SchemaVersion::from_schema(&raw.info.schema),
        name: raw.info.name,
        items,
    })
}

fn parse_item(item: RawItem) -> Result<ItemDefinition, DocumentError> {
    if let Some(request) = item.request {
        return Ok(ItemDefinition::Request(parse_request(
            item.name,
            item.event,
            request,
        )));
    }

    let Some(children) = item.item else {
        return Err(DocumentError::UnknownItem { item: item.name });
    };

    let mut requests = Vec::with_capacity(children.len());
    for child in children {
        match child.request {
            Some(request) => requests.push(parse_request(child.name, child.event, request)),
            None if child.item.is_some() => {
                log::warn!(
                    "skipping nested folder '{}' in folder '{}'; folders nest one level deep",
                    child.name,
                    item.name
                );
            }
            None => return Err(DocumentError::UnknownItem { item: child.name }),
        }
    }

    Ok(ItemDefinition::Folder(FolderDefinition {
        name: item.name,
        requests,
    }))
}

fn parse_request(name: String, events: Vec<RawEvent>, request: RawRequest) -> RequestDefinition {
    let mut template = RequestTemplate::new(request.method, request.url.into_raw());

    for header in request.header.into_iter().filter(|h| !h.disabled) {
        template.set_header(header.key, header.value);
    }

    template.body = request
        .body
        .filter(|body| body.mode == "raw")
        .and_then(|body| body.raw)
        .map(|raw| extract_body_data(&raw));

    let events = events
        .into_iter()
        .filter_map(|event| match Trigger::from_listen(&event.listen) {
            Some(trigger) => Some(ScriptEvent::new(trigger, event.script.exec.into_lines())),
            None => {
                log::debug!("ignoring '{}' script on request '{}'", event.listen, name);
                None
            }
        })
        .collect();

    RequestDefinition {
        name,
        events,
        template,
    }
}

/// Parses a raw body as JSON; anything unparseable becomes an empty object
fn extract_body_data(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Object(Map::new()))
}
