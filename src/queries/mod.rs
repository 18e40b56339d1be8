//! Query modules for the property dashboard SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`PropertyStore`](crate::store::PropertyStore) and exposes methods
//! returning `Result<T>` with typed [`PropertyRecord`](crate::models::PropertyRecord)
//! payloads.

pub mod properties;

pub use properties::{PropertyQuery, SearchPropertiesParams};
