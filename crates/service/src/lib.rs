//! Service layer for the product catalog.
//! - `storage`: file-backed collection persistence.
//! - `catalog`: product types, record operations and the catalog service.
//! - `errors`: the error type every operation reports.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod catalog;
