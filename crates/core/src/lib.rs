// Shared vocabulary for the toolbridge adapters: state tables for the cluster
// management API and the directory-listing engine.

pub mod listing;
pub mod types;

pub use listing::list_directory;
pub use types::*;
