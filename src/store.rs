//! Loaded property list shared by the query and metrics interfaces.
//!
//! The list is pulled through the [`SnapshotCache`] on first access and kept
//! in memory until [`PropertyStore::reset`] is called.

use crate::cache::SnapshotCache;
use crate::error::Result;
use crate::models::PropertyRecord;
use crate::session::Session;
use std::cell::{Ref, RefCell};

/// Owns the snapshot cache, the session, and the memoized record list.
pub struct PropertyStore {
    pub cache: RefCell<SnapshotCache>,
    pub session: RefCell<Session>,
    records: RefCell<Option<Vec<PropertyRecord>>>,
}

impl PropertyStore {
    /// Create a store around a snapshot cache with an anonymous session.
    pub fn new(cache: SnapshotCache) -> Self {
        Self {
            cache: RefCell::new(cache),
            session: RefCell::new(Session::new()),
            records: RefCell::new(None),
        }
    }

    /// Ensure the record list is loaded, fetching it if needed.
    pub fn ensure_loaded(&self) -> Result<()> {
        if self.records.borrow().is_some() {
            return Ok(());
        }
        let session = self.session.borrow();
        let loaded = self.cache.borrow_mut().load_properties(&session)?;
        tracing::debug!(count = loaded.len(), "property list loaded");
        *self.records.borrow_mut() = Some(loaded);
        Ok(())
    }

    /// Borrow the loaded record list.
    pub fn records(&self) -> Result<Ref<'_, [PropertyRecord]>> {
        self.ensure_loaded()?;
        Ok(Ref::map(self.records.borrow(), |r| r.as_deref().unwrap_or(&[])))
    }

    /// Replace the in-memory list with records obtained elsewhere.
    pub fn insert_records(&self, records: Vec<PropertyRecord>) {
        *self.records.borrow_mut() = Some(records);
    }

    pub fn is_loaded(&self) -> bool {
        self.records.borrow().is_some()
    }

    /// Drop the in-memory list so the next access reloads it.
    pub fn reset(&self) {
        self.records.borrow_mut().take();
    }
}
