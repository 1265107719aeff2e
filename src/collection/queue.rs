use super::Request;
use crate::error::Error;
use serde_json::Value;

/// Runs a list of requests one after another.
///
/// The queue runs its requests in the reverse of the order they were given
/// in, and each request finishes (test-script writes included) before the
/// next one starts. The first failure stops the run; environment writes made
/// by requests that already ran are kept.
#[derive(Debug, Clone, Default)]
pub struct ExecutionQueue {
    requests: Vec<Request>,
}

impl ExecutionQueue {
    pub fn new(mut requests: Vec<Request>) -> Self {
        requests.reverse();
        Self { requests }
    }

    /// Identifiers in the order they will run
    pub fn execution_order(&self) -> Vec<&str> {
        self.requests.iter().map(Request::name).collect()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Runs every request and returns the decoded body of the last one run.
    ///
    /// Returns `Ok(None)` for an empty queue. Only the final response is
    /// decoded; earlier bodies are discarded.
    pub fn run(&self) -> Result<Option<Value>, Error> {
        log::info!(
            "Running {} request(s): {}",
            self.requests.len(),
            self.execution_order().join(", ")
        );

        let mut last = None;
        for (index, request) in self.requests.iter().enumerate() {
            let response = request.call().map_err(|e| {
                log::warn!(
                    "Queue aborted at {} ({}/{}): {}",
                    request.name(),
                    index + 1,
                    self.requests.len(),
                    e
                );
                e
            })?;
            last = Some(response);
        }

        let result = match last {
            Some(response) => Some(response.json()?),
            None => None,
        };

        log::info!("Queue finished");
        Ok(result)
    }
}
