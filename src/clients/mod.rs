/// Data entities for tracks and player status
pub mod entities;
/// Error types and result aliases
pub mod errors;
/// Local storage using `DuckDB`
pub mod local_storage;
/// MixQ server API client
pub mod mixq;

pub use local_storage::{LocalStorage, StorageKey};
pub use mixq::MixqClient;
