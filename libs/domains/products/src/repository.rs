use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

/// Storage contract for products
///
/// List results are ordered by id ascending.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Products whose `active` flag equals `active`; a NULL flag never matches
    async fn find_by_active(&self, active: bool) -> ProductResult<Vec<Product>>;

    /// Case-insensitive substring match on the product name
    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>>;

    /// First product (lowest id) carrying `code`
    async fn find_by_code(&self, code: &str) -> ProductResult<Option<Product>>;

    /// Persist a new product and return it with its assigned id
    async fn insert(&self, product: NewProduct) -> ProductResult<Product>;

    /// Overwrite an existing product; `NotFound` if the id is unknown
    async fn save(&self, product: Product) -> ProductResult<Product>;

    /// `NotFound` if the id is unknown
    async fn delete_by_id(&self, id: i64) -> ProductResult<()>;

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for testing/development)
#[derive(Default)]
pub struct InMemoryProductRepository {
    state: RwLock<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    products: BTreeMap<i64, Product>,
    last_id: i64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn find_by_active(&self, active: bool) -> ProductResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| p.active == Some(active))
            .cloned()
            .collect())
    }

    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let needle = fragment.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .filter(|p| p.product_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_code(&self, code: &str) -> ProductResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state
            .products
            .values()
            .find(|p| p.product_code == code)
            .cloned())
    }

    async fn insert(&self, product: NewProduct) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let product = product.with_id(state.last_id);
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let mut state = self.state.write().await;
        match state.products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                tracing::info!(product_id = %product.id, "Saved product");
                Ok(product)
            }
            None => Err(ProductError::NotFound(product.id)),
        }
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let mut state = self.state.write().await;
        state
            .products
            .remove(&id)
            .ok_or(ProductError::NotFound(id))?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let state = self.state.read().await;
        Ok(state.products.contains_key(&id))
    }
}
