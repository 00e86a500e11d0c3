//! Observability module - request ids on responses.

mod request_id;

pub use request_id::RequestIdHeader;
