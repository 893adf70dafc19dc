use std::collections::BTreeMap;

/// Any serializable scalar or structure a story wants to remember.
pub use serde_json::Value;

/// Named variables. Ordered so that snapshots serialize deterministically.
pub type Vars = BTreeMap<String, Value>;
