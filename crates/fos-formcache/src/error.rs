//! Form cache errors

use fos_dom::{NodeId, Property};

/// Errors surfaced by restore and configuration loading
///
/// Restore errors are logged and the element is skipped; they never abort
/// a lifecycle handler.
#[derive(Debug, thiserror::Error)]
pub enum FormCacheError {
    #[error("Malformed cached value on {node}: {source}")]
    MalformedValue {
        node: NodeId,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cached value {value} on {node} cannot be assigned to {property}")]
    UnexpectedValue {
        node: NodeId,
        property: Property,
        value: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid configuration JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),
}
