use chrono::{DateTime, Utc};

use crate::registry::config::DefaultSelection;
use crate::registry::store::BucketSummary;
use crate::types::Literal;

/// Point-in-time view of a registry for diagnostics.
///
/// There is no restore path; this is not a persistence format.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegistrySnapshot {
    pub taken_at: DateTime<Utc>, // informational only
    pub enabled: bool,
    pub default_selection: DefaultSelection,
    pub selected: Vec<Literal>,
    pub buckets: Vec<BucketSummary>,
}
