//! Table store abstraction.
//!
//! A `TableStore` answers paginated scan requests; `Session` scopes one store
//! handle to a single fetch.

pub mod dynamo;
pub mod mock;
pub mod traits;

// Re-export key types
pub use dynamo::DynamoStore;
pub use mock::{MockProbe, MockStore};
pub use traits::{ScanPage, Session, TableStore};
