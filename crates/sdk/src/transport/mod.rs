//! Transport layer for the management API client.

pub mod http;

pub use http::HttpTransport;
