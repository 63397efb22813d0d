//! Context snapshot persistence.
//!
//! The whole [`ContextState`] is stored as one JSON blob under a fixed key
//! in its own tree. The priority map crosses the boundary as a plain JSON
//! object through explicit encode/decode functions; in memory it is always
//! the ordered map. A snapshot that fails to parse, or whose schema version
//! does not match, is discarded with a warning and defaults win.

use serde_json::{Map, Value};
use sled::Db;
use tracing::{debug, warn};

use crate::context::state::{ContextState, SCHEMA_VERSION};
use crate::error::StorageError;
use crate::storage::{to_storage_data, to_storage_io, TREE_CONTEXT};
use crate::types::clamp01;

const SNAPSHOT_KEY: &str = "context";

/// Sled-backed store for the single context snapshot.
#[derive(Clone)]
pub struct SnapshotStore {
    tree: sled::Tree,
}

impl SnapshotStore {
    pub fn new(db: &Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(TREE_CONTEXT).map_err(to_storage_io)?;
        Ok(Self { tree })
    }

    /// Persist the state, replacing any previous snapshot.
    pub fn save(&self, state: &ContextState) -> Result<(), StorageError> {
        let value = encode_snapshot(state);
        let bytes = serde_json::to_vec(&value).map_err(to_storage_data)?;
        self.tree
            .insert(SNAPSHOT_KEY.as_bytes(), bytes)
            .map_err(to_storage_io)?;
        self.tree.flush().map_err(to_storage_io)?;
        Ok(())
    }

    /// Load the persisted snapshot.
    ///
    /// Returns `None` when no snapshot exists, when it cannot be parsed,
    /// or when its schema version does not match; a corrupt blob is never
    /// an error. The only hard failures are storage I/O itself.
    pub fn load(&self) -> Result<Option<ContextState>, StorageError> {
        let Some(raw) = self
            .tree
            .get(SNAPSHOT_KEY.as_bytes())
            .map_err(to_storage_io)?
        else {
            return Ok(None);
        };

        match decode_snapshot(&raw) {
            Ok(state) if state.schema_version == SCHEMA_VERSION => Ok(Some(state)),
            Ok(state) => {
                warn!(
                    found = state.schema_version,
                    expected = SCHEMA_VERSION,
                    "Discarding context snapshot with mismatched schema version"
                );
                Ok(None)
            }
            Err(err) => {
                warn!("Discarding unreadable context snapshot: {}", err);
                Ok(None)
            }
        }
    }

    /// Delete the persisted snapshot.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.tree
            .remove(SNAPSHOT_KEY.as_bytes())
            .map_err(to_storage_io)?;
        self.tree.flush().map_err(to_storage_io)?;
        debug!("Context snapshot cleared");
        Ok(())
    }
}

/// Encode the state to its wire form.
///
/// serde would produce a JSON object for the priority map on its own, but
/// the conversion stays explicit so the wire shape is pinned by this
/// function and not by container serialization details.
pub fn encode_snapshot(state: &ContextState) -> Value {
    let mut value = serde_json::to_value(state).unwrap_or(Value::Null);
    if let Value::Object(ref mut root) = value {
        if let Some(Value::Object(molecules)) = root.get_mut("molecules") {
            molecules.insert(
                "priority".to_string(),
                priority_to_object(&state.molecules.priority),
            );
        }
    }
    value
}

/// Decode a wire snapshot back to the in-memory state.
pub fn decode_snapshot(bytes: &[u8]) -> Result<ContextState, serde_json::Error> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    if let Value::Object(ref mut root) = value {
        if let Some(Value::Object(molecules)) = root.get_mut("molecules") {
            let priority = molecules
                .remove("priority")
                .map(|v| priority_from_object(&v))
                .unwrap_or_default();
            molecules.insert(
                "priority".to_string(),
                serde_json::to_value(priority).unwrap_or(Value::Null),
            );
        }
    }
    serde_json::from_value(value)
}

fn priority_to_object(priority: &std::collections::BTreeMap<String, f64>) -> Value {
    let mut object = Map::new();
    for (category, weight) in priority {
        object.insert(category.clone(), Value::from(clamp01(*weight)));
    }
    Value::Object(object)
}

fn priority_from_object(value: &Value) -> std::collections::BTreeMap<String, f64> {
    let mut priority = std::collections::BTreeMap::new();
    if let Value::Object(object) = value {
        for (category, weight) in object {
            if let Some(w) = weight.as_f64() {
                priority.insert(category.clone(), clamp01(w));
            }
        }
    }
    priority
}
