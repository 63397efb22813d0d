//! Sled database handle and shared storage helpers.
//!
//! One embedded database per data directory; each subsystem opens its own
//! named tree. Values are JSON so snapshots and queue records stay
//! inspectable with standard tooling.

use std::io;
use std::path::Path;

use crate::error::StorageError;

/// Tree holding the single serialized context snapshot.
pub const TREE_CONTEXT: &str = "context_snapshot";
/// Tree holding booking records keyed by booking id.
pub const TREE_BOOKINGS: &str = "bookings";
/// Secondary index over unsynced bookings, keyed for creation order.
pub const TREE_BOOKINGS_PENDING: &str = "bookings_pending";
/// Tree holding CMS content entries keyed by dotted key.
pub const TREE_CMS: &str = "cms_entries";

/// Open the embedded database at the given path.
pub fn open_db<P: AsRef<Path>>(path: P) -> Result<sled::Db, StorageError> {
    sled::open(path).map_err(to_storage_io)
}

pub(crate) fn to_storage_io(err: sled::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::Other, err.to_string()))
}

pub(crate) fn to_storage_data(err: serde_json::Error) -> StorageError {
    StorageError::IoError(io::Error::new(io::ErrorKind::InvalidData, err.to_string()))
}
