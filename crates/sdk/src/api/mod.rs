//! Endpoint groups of the management API.

pub mod clusters;
pub mod configurations;
pub mod fallback;
pub mod requests;
pub mod services;

pub use clusters::ClustersApi;
pub use configurations::ConfigurationsApi;
pub use fallback::{with_fallback, Attempt, Fallback};
pub use requests::RequestsApi;
pub use services::ServicesApi;

/// Percent-encode a caller-supplied path segment or query value.
///
/// Only ASCII alphanumerics and `*-._` pass through, so `/`, `?`, `&` and `#`
/// cannot reshape the request.
pub(crate) fn escape(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
