use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, ProductRequest, ProductResponse};
use crate::repository::ProductRepository;

/// Business rules for products; storage is injected through [`ProductService::new`].
#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_code = ?input.product_code))]
    pub async fn create_product(&self, input: ProductRequest) -> ProductResult<ProductResponse> {
        input.validate()?;

        let product = self.repository.insert(NewProduct::try_from(input)?).await?;
        Ok(product.into())
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<ProductResponse> {
        self.repository
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_product_by_code(&self, code: &str) -> ProductResult<ProductResponse> {
        self.repository
            .find_by_code(code)
            .await?
            .map(Into::into)
            .ok_or_else(|| ProductError::CodeNotFound(code.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn list_active_products(&self) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_by_active(true).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, fragment: &str) -> ProductResult<Vec<ProductResponse>> {
        let products = self.repository.find_by_name_containing(fragment).await?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    /// Replace every mutable field; an omitted `active` is stored as NULL.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: i64,
        input: ProductRequest,
    ) -> ProductResult<ProductResponse> {
        input.validate()?;

        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.replace_with(input)?;
        let saved = self.repository.save(product).await?;
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn deactivate_product(&self, id: i64) -> ProductResult<ProductResponse> {
        let mut product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.active = Some(false);
        let saved = self.repository.save(product).await?;
        Ok(saved.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.exists_by_id(id).await? {
            return Err(ProductError::NotFound(id));
        }
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;
    use rust_decimal::Decimal;

    fn product(id: i64) -> Product {
        Product {
            id,
            product_code: format!("P{id}"),
            product_name: "Widget".into(),
            description: Some("A widget".into()),
            price: Decimal::new(999, 2),
            quantity: 5,
            active: Some(true),
        }
    }

    fn request() -> ProductRequest {
        ProductRequest {
            product_code: Some("P1".into()),
            product_name: Some("Widget".into()),
            price: Some(Decimal::new(999, 2)),
            quantity: Some(5),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_product_defaults_active() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_insert()
            .withf(|p| p.active && p.product_code == "P1")
            .times(1)
            .returning(|p| Ok(p.with_id(1)));

        let service = ProductService::new(mock_repo);
        let created = service.create_product(request()).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.active, Some(true));
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_insert().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .create_product(ProductRequest {
                quantity: Some(0),
                ..request()
            })
            .await;

        assert_eq!(
            result,
            Err(ProductError::Validation("Quantity must be greater than 0".into()))
        );
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert_eq!(service.get_product(99).await, Err(ProductError::NotFound(99)));
    }

    #[tokio::test]
    async fn test_get_product_by_code_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "NOPE")
            .returning(|_| Ok(None));

        let service = ProductService::new(mock_repo);
        assert_eq!(
            service.get_product_by_code("NOPE").await,
            Err(ProductError::CodeNotFound("NOPE".into()))
        );
    }

    #[tokio::test]
    async fn test_list_active_products_asks_for_true() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_active()
            .with(eq(true))
            .times(1)
            .returning(|_| Ok(vec![product(1), product(2)]));

        let service = ProductService::new(mock_repo);
        let active = service.list_active_products().await.unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_search_products_passes_fragment() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_name_containing()
            .withf(|fragment| fragment == "wid")
            .times(1)
            .returning(|_| Ok(vec![product(3)]));

        let service = ProductService::new(mock_repo);
        let found = service.search_products("wid").await.unwrap();
        assert_eq!(found[0].id, 3);
    }

    #[tokio::test]
    async fn test_update_product_replaces_fields_and_nulls_active() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(product(id))));
        mock_repo
            .expect_save()
            .withf(|p| p.id == 4 && p.active.is_none() && p.description.is_none())
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let updated = service.update_product(4, request()).await.unwrap();

        assert_eq!(updated.product_code, "P1");
        assert_eq!(updated.active, None);
    }

    #[tokio::test]
    async fn test_update_product_missing_id() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProductService::new(mock_repo);
        assert_eq!(
            service.update_product(8, request()).await,
            Err(ProductError::NotFound(8))
        );
    }

    #[tokio::test]
    async fn test_update_product_validates_before_lookup() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_find_by_id().never();

        let service = ProductService::new(mock_repo);
        let result = service
            .update_product(
                8,
                ProductRequest {
                    product_name: Some("".into()),
                    ..request()
                },
            )
            .await;
        assert_eq!(
            result,
            Err(ProductError::Validation("Product name is required".into()))
        );
    }

    #[tokio::test]
    async fn test_deactivate_only_touches_active() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(product(id))));
        mock_repo
            .expect_save()
            .withf(|p| *p == Product { active: Some(false), ..product(6) })
            .times(1)
            .returning(Ok);

        let service = ProductService::new(mock_repo);
        let result = service.deactivate_product(6).await.unwrap();
        assert_eq!(result.active, Some(false));
        assert_eq!(result.description.as_deref(), Some("A widget"));
    }

    #[tokio::test]
    async fn test_delete_product_checks_existence() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_exists_by_id()
            .with(eq(2))
            .returning(|_| Ok(false));
        mock_repo.expect_delete_by_id().never();

        let service = ProductService::new(mock_repo);
        assert_eq!(service.delete_product(2).await, Err(ProductError::NotFound(2)));
    }

    #[tokio::test]
    async fn test_delete_product() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_exists_by_id().returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_id()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProductService::new(mock_repo);
        assert!(service.delete_product(2).await.is_ok());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_find_all()
            .returning(|| Err(ProductError::Database("connection reset".into())));

        let service = ProductService::new(mock_repo);
        assert_eq!(
            service.list_products().await,
            Err(ProductError::Database("connection reset".into()))
        );
    }
}
