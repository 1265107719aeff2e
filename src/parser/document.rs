//! Raw collection document shapes.
//!
//! These mirror the JSON layout one-to-one; [`super::parse_collection`] turns
//! them into request definitions.

use serde::Deserialize;

/// Document root
#[derive(Debug, Deserialize)]
pub struct RawCollection {
    pub info: RawInfo,
    pub item: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
pub struct RawInfo {
    pub name: String,
    #[serde(default)]
    pub schema: String,
}

/// A request (has `request`) or a folder (has `item`)
#[derive(Debug, Deserialize)]
pub struct RawItem {
    pub name: String,
    #[serde(default)]
    pub event: Vec<RawEvent>,
    pub request: Option<RawRequest>,
    pub item: Option<Vec<RawItem>>,
}

#[derive(Debug, Deserialize)]
pub struct RawEvent {
    pub listen: String,
    #[serde(default)]
    pub script: RawScript,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawScript {
    #[serde(default)]
    pub exec: ScriptSource,
}

/// `exec` is usually a list of lines, occasionally one string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScriptSource {
    Lines(Vec<String>),
    Text(String),
}

impl Default for ScriptSource {
    fn default() -> Self {
        ScriptSource::Lines(Vec::new())
    }
}

impl ScriptSource {
    pub fn into_lines(self) -> Vec<String> {
        match self {
            ScriptSource::Lines(lines) => lines,
            ScriptSource::Text(text) => text.lines().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawRequest {
    pub url: RawUrl,
    pub method: String,
    #[serde(default)]
    pub header: Vec<RawHeader>,
    pub body: Option<RawBody>,
}

/// `url` is either the raw string or an object carrying it
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawUrl {
    Text(String),
    Object { raw: String },
}

impl RawUrl {
    pub fn into_raw(self) -> String {
        match self {
            RawUrl::Text(raw) | RawUrl::Object { raw } => raw,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawHeader {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Deserialize)]
pub struct RawBody {
    #[serde(default)]
    pub mode: String,
    pub raw: Option<String>,
}
