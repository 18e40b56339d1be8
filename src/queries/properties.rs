//! Property listing queries over the loaded record list.

use crate::error::{DashboardError, Result};
use crate::models::PropertyRecord;
use crate::store::PropertyStore;

// ---------------------------------------------------------------------------
// SearchPropertiesParams
// ---------------------------------------------------------------------------

/// Parameters for the property search method.
#[derive(Debug, Clone, Default)]
pub struct SearchPropertiesParams {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    pub property_type: Option<String>,
    /// Matched case-insensitively.
    pub status: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

// ---------------------------------------------------------------------------
// PropertyQuery
// ---------------------------------------------------------------------------

/// Query interface for property listings backed by the [`PropertyStore`].
pub struct PropertyQuery<'a> {
    store: &'a PropertyStore,
}

impl<'a> PropertyQuery<'a> {
    /// Create a new `PropertyQuery` bound to the given store.
    pub fn new(store: &'a PropertyStore) -> Self {
        Self { store }
    }

    /// List listings in source order with optional `limit` / `offset` pagination.
    pub fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<PropertyRecord>> {
        let records = self.store.records()?;
        Ok(paginate(records.iter(), limit, offset))
    }

    /// Get a single listing by its `_id`.
    ///
    /// Looks in the loaded list first and falls back to the per-listing
    /// endpoint.
    pub fn get(&self, id: &str) -> Result<Option<PropertyRecord>> {
        {
            let records = self.store.records()?;
            if let Some(found) = records.iter().find(|r| r.id.as_deref() == Some(id)) {
                return Ok(Some(found.clone()));
            }
        }
        let session = self.store.session.borrow();
        match self.store.cache.borrow_mut().fetch_property(id, &session) {
            Ok(record) => Ok(Some(record)),
            Err(DashboardError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// All listings with exactly this `propertyType` tag.
    pub fn by_type(&self, property_type: &str) -> Result<Vec<PropertyRecord>> {
        self.search(&SearchPropertiesParams {
            property_type: Some(property_type.to_string()),
            ..Default::default()
        })
    }

    /// All listings with this status (case-insensitive).
    pub fn by_status(&self, status: &str) -> Result<Vec<PropertyRecord>> {
        self.search(&SearchPropertiesParams {
            status: Some(status.to_string()),
            ..Default::default()
        })
    }

    /// Search listings with any combination of filters.
    ///
    /// Price bounds are inclusive and compare against the coerced price.
    pub fn search(&self, params: &SearchPropertiesParams) -> Result<Vec<PropertyRecord>> {
        if let (Some(lo), Some(hi)) = (params.min_price, params.max_price) {
            if lo > hi {
                return Err(DashboardError::InvalidArgument(format!(
                    "min_price {} is greater than max_price {}",
                    lo, hi
                )));
            }
        }

        let title = params.title.as_ref().map(|t| t.to_lowercase());
        let records = self.store.records()?;

        let matches = records.iter().filter(|r| {
            if let Some(t) = &title {
                if !r.title.to_lowercase().contains(t.as_str()) {
                    return false;
                }
            }
            if let Some(pt) = &params.property_type {
                if &r.property_type != pt {
                    return false;
                }
            }
            if let Some(st) = &params.status {
                if !r.status.trim().eq_ignore_ascii_case(st.trim()) {
                    return false;
                }
            }
            let price = r.price_amount();
            if params.min_price.is_some_and(|lo| price < lo) {
                return false;
            }
            if params.max_price.is_some_and(|hi| price > hi) {
                return false;
            }
            true
        });

        Ok(paginate(matches, params.limit, params.offset))
    }

    /// Number of loaded listings.
    pub fn count(&self) -> Result<usize> {
        Ok(self.store.records()?.len())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn paginate<'r>(
    iter: impl Iterator<Item = &'r PropertyRecord>,
    limit: Option<usize>,
    offset: Option<usize>,
) -> Vec<PropertyRecord> {
    iter.skip(offset.unwrap_or(0))
        .take(limit.unwrap_or(usize::MAX))
        .cloned()
        .collect()
}
