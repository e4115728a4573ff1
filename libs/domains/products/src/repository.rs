use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};

/// Product persistence.
///
/// Every write is committed before the call returns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, ordered by id
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Persist a new product; the repository assigns the id
    async fn insert(&self, input: ProductInput) -> ProductResult<Product>;

    /// Persist a replacement for an existing product
    async fn update(&self, product: Product) -> ProductResult<Product>;

    async fn remove(&self, product: &Product) -> ProductResult<()>;
}

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    rows: BTreeMap<i32, Product>,
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn insert(&self, input: ProductInput) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id sequence exhausted".to_string()))?;
        store.last_id = id;

        let product = Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
        };
        store.rows.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn update(&self, product: Product) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let slot = store
            .rows
            .get_mut(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;
        *slot = product.clone();

        tracing::info!(product_id = product.id, "Updated product");
        Ok(product)
    }

    async fn remove(&self, product: &Product) -> ProductResult<()> {
        let mut store = self.store.write().await;

        store
            .rows
            .remove(&product.id)
            .ok_or(ProductError::NotFound(product.id))?;

        tracing::info!(product_id = product.id, "Deleted product");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: "Blue ink".to_string(),
            price: "1.50".to_string(),
            quantity: 100,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryProductRepository::new();

        let first = repo.insert(input("Fountain pen")).await.unwrap();
        let second = repo.insert(input("Ballpoint pen")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.find_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_remove() {
        let repo = InMemoryProductRepository::new();

        let first = repo.insert(input("Fountain pen")).await.unwrap();
        repo.remove(&first).await.unwrap();
        let second = repo.insert(input("Ballpoint pen")).await.unwrap();

        assert_eq!(second.id, 2);
        assert!(repo.find_by_id(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_row() {
        let repo = InMemoryProductRepository::new();
        let product = repo.insert(input("Fountain pen")).await.unwrap();

        let replacement = product.clone().with_input(input("Gel pen"));
        repo.update(replacement.clone()).await.unwrap();

        assert_eq!(repo.find_by_id(product.id).await.unwrap(), Some(replacement));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = Product {
            id: 42,
            name: "Ghost".into(),
            description: "Never stored".into(),
            price: "0".into(),
            quantity: 0,
        };

        assert!(matches!(
            repo.update(ghost).await,
            Err(ProductError::NotFound(42))
        ));
    }
}
