use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::errors::ServiceError;

use super::product::{NewProduct, Product, ProductPatch};
use super::records;
use super::store::ProductStorage;

/// Catalog operations over a `ProductStorage`.
///
/// Every call loads the whole collection. Mutations hold `write_gate` across
/// load, change and save so that concurrent writers in this process are
/// serialized; reads do not take it.
pub struct CatalogService {
    storage: Arc<dyn ProductStorage>,
    write_gate: Mutex<()>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn ProductStorage>) -> Self {
        Self { storage, write_gate: Mutex::new(()) }
    }

    /// Full collection, optionally narrowed to names containing `name`.
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Product>, ServiceError> {
        let products = self.storage.load().await?;
        Ok(match name {
            Some(needle) => records::filter_by_name(products, needle),
            None => products,
        })
    }

    pub async fn get(&self, id: u64) -> Result<Option<Product>, ServiceError> {
        let products = self.storage.load().await?;
        Ok(records::find_by_id(&products, id).cloned())
    }

    #[instrument(skip(self, input), fields(requested_id = ?input.id))]
    pub async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        input.validate()?;
        let _guard = self.write_gate.lock().await;
        let mut products = self.storage.load().await?;
        let id = match input.id {
            Some(id) if records::position_of(&products, id).is_some() => {
                return Err(ServiceError::Conflict(format!("product {} already exists", id)));
            }
            Some(id) => id,
            None => records::next_id(&products),
        };
        let product = input.into_product(id);
        records::insert(&mut products, product.clone());
        self.storage.save(&products).await?;
        info!(id, total = products.len(), "product_created");
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ServiceError> {
        patch.validate(id)?;
        let _guard = self.write_gate.lock().await;
        let mut products = self.storage.load().await?;
        let index = records::position_of(&products, id).ok_or_else(|| ServiceError::not_found("product"))?;
        let updated = records::merge_at(&mut products, index, patch);
        self.storage.save(&products).await?;
        info!(id, "product_updated");
        Ok(updated)
    }

    /// Remove the record; returns whether it existed. A missing id leaves
    /// storage untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut products = self.storage.load().await?;
        let Some(index) = records::position_of(&products, id) else {
            return Ok(false);
        };
        records::remove_at(&mut products, index);
        self.storage.save(&products).await?;
        info!(id, total = products.len(), "product_deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::MemoryProductStore;
    use crate::storage::json_list_store::JsonListStore;

    fn product(id: u64, name: &str, price: f64, quantity: u32) -> Product {
        Product { id, product_name: name.into(), image: String::new(), price, quantity }
    }

    fn new_product(id: Option<u64>, name: &str, price: f64, quantity: u32) -> NewProduct {
        NewProduct { id, product_name: name.into(), image: String::new(), price, quantity }
    }

    fn service_with(products: Vec<Product>) -> (CatalogService, Arc<MemoryProductStore>) {
        let store = Arc::new(MemoryProductStore::new(products));
        (CatalogService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn catalog_scenario_create_update_delete() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with(vec![product(1, "A", 10.0, 2)]);

        svc.create(new_product(Some(2), "B", 20.0, 1)).await?;
        let all = svc.list(None).await?;
        assert_eq!(all, vec![product(1, "A", 10.0, 2), product(2, "B", 20.0, 1)]);

        let patch = ProductPatch { price: Some(25.0), ..Default::default() };
        svc.update(2, patch).await?;
        assert_eq!(svc.get(2).await?, Some(product(2, "B", 25.0, 1)));

        assert!(svc.delete(1).await?);
        assert_eq!(svc.get(1).await?, None);
        assert_eq!(svc.list(None).await?, vec![product(2, "B", 25.0, 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn created_record_reads_back_equal() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with(vec![]);
        let input = NewProduct { image: "https://cdn.example/b.png".into(), ..new_product(Some(42), "Basil", 3.5, 9) };
        let created = svc.create(input.clone()).await?;
        assert_eq!(created, input.into_product(42));
        assert_eq!(svc.get(42).await?, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn create_assigns_next_id_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with(vec![product(4, "A", 1.0, 1)]);
        let created = svc.create(new_product(None, "B", 1.0, 1)).await?;
        assert_eq!(created.id, 5);

        let dup = svc.create(new_product(Some(4), "C", 1.0, 1)).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        assert_eq!(store.load().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_create_is_not_persisted() -> Result<(), anyhow::Error> {
        let (svc, store) = service_with(vec![]);
        let res = svc.create(new_product(None, "", 1.0, 1)).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
        assert!(store.load().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_missing_report_not_found() -> Result<(), anyhow::Error> {
        let before = vec![product(1, "A", 10.0, 2)];
        let (svc, store) = service_with(before.clone());

        let res = svc.update(9, ProductPatch { quantity: Some(3), ..Default::default() }).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert!(!svc.delete(9).await?);
        assert_eq!(store.load().await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_name() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with(vec![product(1, "Milk", 1.0, 1), product(2, "Bread", 1.0, 1), product(3, "Oat MILK", 1.0, 1)]);
        let ids: Vec<u64> = svc.list(Some("milk")).await?.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() -> Result<(), anyhow::Error> {
        let (svc, _) = service_with(vec![]);
        let svc = Arc::new(svc);
        let mut handles = Vec::new();
        for i in 0..16 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.create(new_product(None, &format!("item-{i}"), 1.0, 1)).await
            }));
        }
        for h in handles {
            h.await??;
        }
        let mut ids: Vec<u64> = svc.list(None).await?.into_iter().map(|p| p.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<u64>>());
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_service_survives_reload() -> Result<(), anyhow::Error> {
        let path = std::env::temp_dir().join(format!("catalog_service_{}.json", uuid::Uuid::new_v4()));
        let file_store = JsonListStore::<Product>::new(&path);
        file_store.init_if_missing().await?;
        let svc = CatalogService::new(Arc::new(file_store));
        svc.create(new_product(None, "Jam", 4.0, 3)).await?;
        svc.create(new_product(None, "Honey", 8.0, 1)).await?;
        svc.delete(1).await?;

        let reopened = CatalogService::new(Arc::new(JsonListStore::<Product>::new(&path)));
        assert_eq!(reopened.list(None).await?, vec![product(2, "Honey", 8.0, 1)]);

        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_backing_file_surfaces_storage_error() {
        let path = std::env::temp_dir().join(format!("catalog_absent_{}.json", uuid::Uuid::new_v4()));
        let svc = CatalogService::new(Arc::new(JsonListStore::<Product>::new(path)));
        assert!(matches!(svc.list(None).await, Err(ServiceError::Storage(_))));
        assert!(matches!(svc.get(1).await, Err(ServiceError::Storage(_))));
    }
}
