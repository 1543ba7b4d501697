pub mod auth;
pub mod catalog;
pub mod error;
pub mod store;

pub use auth::{AuthClient, SignUpOutcome};
pub use catalog::{CatalogClient, TrendWindow};
pub use error::RemoteError;
pub use store::StoreClient;
