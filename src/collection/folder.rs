use super::{ExecutionQueue, Lookup, LookupError, Request};
use crate::error::Error;
use serde_json::Value;

/// A named group of requests, one level deep.
#[derive(Debug, Clone)]
pub struct Folder {
    name: String,
    display_name: String,
    requests: Vec<Request>,
}

impl Folder {
    /// Creates a folder. Requests sharing an identifier collapse into the
    /// first one's position, keeping the last definition.
    pub fn new(display_name: impl Into<String>, requests: Vec<Request>) -> Self {
        let display_name = display_name.into();
        let name = crate::parser::names::normalize_class_name(&display_name);

        let mut unique: Vec<Request> = Vec::with_capacity(requests.len());
        for request in requests {
            match unique.iter_mut().find(|r| r.name() == request.name()) {
                Some(existing) => {
                    log::warn!(
                        "Duplicate request `{}` in folder `{}`; keeping the last definition",
                        request.name(),
                        name
                    );
                    *existing = request;
                }
                None => unique.push(request),
            }
        }

        Self {
            name,
            display_name,
            requests: unique,
        }
    }

    /// Normalized identifier
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    /// Request identifiers in document order
    pub fn identifiers(&self) -> Vec<&str> {
        self.requests.iter().map(Request::name).collect()
    }

    /// Finds a request by identifier, suggesting the closest one on a miss
    pub fn lookup(&self, name: &str) -> Lookup<'_, Request> {
        match self.requests.iter().find(|r| r.name() == name) {
            Some(request) => Lookup::Found(request),
            None => Lookup::missing(name, self.identifiers()),
        }
    }

    pub fn request(&self, name: &str) -> Result<&Request, LookupError> {
        self.lookup(name).into_result(name, &self.name)
    }

    /// Runs every request in the folder through an [`ExecutionQueue`]
    pub fn call(&self) -> Result<Option<Value>, Error> {
        ExecutionQueue::new(self.requests.clone()).run()
    }

    pub fn help(&self) -> String {
        self.identifiers()
            .iter()
            .map(|id| format!("{}.{}()", self.name, id))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
