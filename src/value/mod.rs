mod merge;
mod subset;

pub use merge::merge_values;
pub use subset::{is_subset, value_is_empty};

/// The in-memory representation of any managed configuration.
///
/// Mappings keep insertion order (`serde_json` is built with `preserve_order`),
/// which is what makes append-only merges and deterministic key ordering work.
pub use serde_json::Value;
