//! HTTP transport shared by OAuth and REST API calls.

mod transport;

pub use transport::{execute, HttpRequest, HttpResponse, Transport, TransportConfig};
