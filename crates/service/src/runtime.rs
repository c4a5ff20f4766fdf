//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so binary crates can prepare the data
//! directory and the products file through `service` alone.

use std::path::Path;

use tracing::info;

use crate::catalog::Product;
use crate::storage::json_list_store::JsonListStore;

/// Ensure expected directories exist; warn on missing optional ones.
pub async fn ensure_env(frontend_dir: &str, data_dir: &str) -> anyhow::Result<()> {
    common::env::ensure_env(frontend_dir, data_dir).await
}

/// Open the products file, seeding an empty collection when asked to and
/// the file does not exist yet.
pub async fn open_products_file(path: &Path, create_if_missing: bool) -> anyhow::Result<JsonListStore<Product>> {
    let store = JsonListStore::<Product>::new(path);
    if create_if_missing && store.init_if_missing().await? {
        info!(path = %path.display(), "created empty products file");
    }
    Ok(store)
}
