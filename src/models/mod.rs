//! Data models for requests and responses.
//!
//! This module contains the request template read from a collection, the
//! concrete request handed to a transport, and the transport's response.

pub mod request;
pub mod response;

pub use request::{PreparedRequest, RequestTemplate};
pub use response::HttpResponse;
