//! Client-side synchronization between a remote product API and local view state.

pub mod config;
pub mod error;
pub mod service;
pub mod store;

pub use config::{load_settings, load_settings_from, ClientSettings};
pub use error::{ServiceError, StoreError};
pub use service::{HttpProductService, ProductService};
pub use store::{Operation, ProductStore, Status, StoreEvent, StoreSnapshot, SubmitOutcome};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
