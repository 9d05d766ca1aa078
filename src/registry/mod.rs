pub mod config;
pub mod literal;
pub mod registry;
pub mod snapshot;
pub mod store;

pub use config::{ConfigError, DefaultSelection, RegistryConfig};
pub use literal::LiteralState;
pub use registry::Registry;
pub use snapshot::RegistrySnapshot;
pub use store::{AttrError, BucketSummary};
