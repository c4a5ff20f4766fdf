//! Product catalog: record types, collection operations, storage seam and
//! the service that ties them together.

pub mod product;
pub mod records;
pub mod service;
pub mod store;

pub use product::{NewProduct, Product, ProductPatch};
pub use service::CatalogService;
pub use store::{MemoryProductStore, ProductStorage};
