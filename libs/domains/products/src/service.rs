//! Product Service - Business logic layer

use axum::http::StatusCode;
use axum_helpers::{Payload, Violations};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::rules::PRODUCT_RULES;

pub const CREATED_MESSAGE: &str = "Product created successfully";
pub const UPDATED_MESSAGE: &str = "Product updated successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Field rules, then typed conversion. An empty list means the body is accepted.
    pub fn validate(&self, input: &Map<String, Value>) -> Violations {
        parse(input).err().unwrap_or_default()
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ProductResult<Payload<Vec<Product>>> {
        let products = self.repository.find_all().await?;
        Ok(Payload::ok(products))
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> ProductResult<Payload<Product>> {
        let product = self.find(id).await?;
        Ok(Payload::ok(product))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &Map<String, Value>) -> ProductResult<Payload<Product>> {
        let input = parse(input).map_err(ProductError::Invalid)?;
        let product = self.repository.insert(input).await?;

        Ok(Payload::created(product).with_message(CREATED_MESSAGE))
    }

    /// Overwrites all four business fields of an existing product.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: &Map<String, Value>,
    ) -> ProductResult<Payload<Product>> {
        let existing = self.find(id).await?;
        let input = parse(input).map_err(ProductError::Invalid)?;
        let product = self.repository.update(existing.with_input(input)).await?;

        Ok(Payload::ok(product).with_message(UPDATED_MESSAGE))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> ProductResult<Payload<()>> {
        let existing = self.find(id).await?;
        self.repository.remove(&existing).await?;

        Ok(Payload::message_only(StatusCode::OK, DELETED_MESSAGE))
    }

    async fn find(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

fn parse(input: &Map<String, Value>) -> Result<ProductInput, Violations> {
    PRODUCT_RULES.validate(input).into_result(())?;
    ProductInput::from_fields(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use mockall::predicate::eq;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn valid_body() -> Map<String, Value> {
        body(json!({
            "name": "Fountain pen",
            "description": "Blue ink",
            "price": "1.50",
            "quantity": 100
        }))
    }

    fn stored(id: i32) -> Product {
        Product {
            id,
            name: "Pencil case".into(),
            description: "Zipped".into(),
            price: "3.00".into(),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn test_create_persists_submitted_values() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .withf(|input| input.name == "Fountain pen" && input.quantity == 100)
            .times(1)
            .returning(|input| {
                Ok(Product {
                    id: 1,
                    name: input.name,
                    description: input.description,
                    price: input.price,
                    quantity: input.quantity,
                })
            });

        let service = ProductService::new(mock_repo);
        let payload = service.create(&valid_body()).await.unwrap();

        assert_eq!(payload.status(), StatusCode::CREATED);
        assert_eq!(payload.message(), Some(CREATED_MESSAGE));
        let product = payload.data().unwrap();
        assert_eq!(product.name, "Fountain pen");
        assert_eq!(product.description, "Blue ink");
        assert_eq!(product.price, "1.50");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_without_persisting() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create(&body(json!({"name": "Pen", "description": "Blue pen", "price": "1.50", "quantity": 100})))
            .await;

        match result {
            Err(ProductError::Invalid(violations)) => {
                assert_eq!(violations.messages_for("name").len(), 1);
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(999))
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.get(999).await,
            Err(ProductError::NotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(stored(id))));
        mock_repo
            .expect_update()
            .withf(|p| {
                p.id == 4
                    && p.name == "Fountain pen"
                    && p.description == "Blue ink"
                    && p.price == "1.50"
                    && p.quantity == 100
            })
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let payload = service.update(4, &valid_body()).await.unwrap();

        assert_eq!(payload.status(), StatusCode::OK);
        assert_eq!(payload.message(), Some(UPDATED_MESSAGE));
        assert_eq!(payload.data().unwrap().id, 4);
    }

    #[tokio::test]
    async fn test_update_missing_checks_existence_first() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service.update(5, &Map::new()).await;

        assert!(matches!(result, Err(ProductError::NotFound(5))));
    }

    #[tokio::test]
    async fn test_update_invalid_does_not_persist() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored(id))));
        mock_repo.expect_update().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update(4, &body(json!({"name": "", "description": "x", "price": "1", "quantity": 1})))
            .await;

        assert!(matches!(result, Err(ProductError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_existing() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(2))
            .returning(|id| Ok(Some(stored(id))));
        mock_repo
            .expect_remove()
            .withf(|p| p.id == 2)
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        let payload = service.delete(2).await.unwrap();

        assert_eq!(payload.status(), StatusCode::OK);
        assert_eq!(payload.message(), Some(DELETED_MESSAGE));
        assert!(payload.data().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_remove().never();

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.delete(999).await,
            Err(ProductError::NotFound(999))
        ));
    }

    #[tokio::test]
    async fn test_list_propagates_database_errors() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductError::Database(sea_orm::DbErr::Custom("down".into()))));

        let service = ProductService::new(mock_repo);
        assert!(matches!(
            service.list().await,
            Err(ProductError::Database(_))
        ));
    }

    #[test]
    fn test_validate_reports_conversion_failures() {
        let service = ProductService::new(MockProductRepository::new());
        let violations = service.validate(&body(json!({
            "name": "Fountain pen",
            "description": "Blue ink",
            "price": "1.50",
            "quantity": "many"
        })));

        assert_eq!(
            violations.messages_for("quantity"),
            vec!["This value should be a valid integer."]
        );
    }
}
