use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::json_list_store::JsonListStore;

use super::product::Product;

/// Whole-collection storage for products.
///
/// `load` returns the full ordered collection; `save` replaces it.
#[async_trait]
pub trait ProductStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<Product>, ServiceError>;
    async fn save(&self, products: &[Product]) -> Result<(), ServiceError>;
}

#[async_trait]
impl ProductStorage for JsonListStore<Product> {
    async fn load(&self) -> Result<Vec<Product>, ServiceError> { JsonListStore::load(self).await }
    async fn save(&self, products: &[Product]) -> Result<(), ServiceError> { JsonListStore::save(self, products).await }
}

/// Process-local storage, used by tests and as a drop-in for the file store.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new(products: Vec<Product>) -> Self {
        Self { inner: RwLock::new(products) }
    }
}

#[async_trait]
impl ProductStorage for MemoryProductStore {
    async fn load(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, products: &[Product]) -> Result<(), ServiceError> {
        *self.inner.write().await = products.to_vec();
        Ok(())
    }
}
