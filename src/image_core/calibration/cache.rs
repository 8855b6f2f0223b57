use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::image_core::calibration::provider::CalibrationProvider;
use crate::image_core::calibration::types::{CalibrationKey, CalibrationMatrix};
use crate::image_core::common::error::Result;

/// Per-connection cache of calibration matrices.
///
/// The first request for a key loads the matrix from the provider and
/// memoizes it; later requests return the cached `Arc`. Device calibration
/// does not change within a session, so there is no eviction — the cache
/// lives exactly as long as its connection and is cleared when the
/// connection closes.
///
/// Reads after first population are pure lookups. A race between two
/// threads populating the same key is resolved idempotently: the entry that
/// landed first wins and the losing computation is dropped, since every
/// load of a key yields an equal matrix.
pub struct CalibrationCache {
    connection_id: u32,
    entries: RwLock<HashMap<CalibrationKey, Arc<CalibrationMatrix>>>,
}

impl CalibrationCache {
    pub fn new(connection_id: u32) -> Self {
        Self {
            connection_id,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn connection_id(&self) -> u32 {
        self.connection_id
    }

    pub fn get<P: CalibrationProvider>(
        &self,
        key: CalibrationKey,
        provider: &P,
    ) -> Result<Arc<CalibrationMatrix>> {
        if let Some(matrix) = self.entries.read().get(&key) {
            return Ok(Arc::clone(matrix));
        }

        let loaded = Arc::new(provider.load(self.connection_id, key)?);
        debug!(connection = self.connection_id, %key, "Loaded calibration matrix");

        let mut entries = self.entries.write();
        let entry = entries.entry(key).or_insert(loaded);
        Ok(Arc::clone(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every cached matrix. Called when the owning connection closes.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
