use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    repository::ProductRepository,
};

/// Postgres-backed product storage
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// `%fragment%` with LIKE wildcards in the fragment escaped by a backslash,
/// which is Postgres's default LIKE escape character.
fn contains_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_active(&self, active: bool) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Active.eq(active))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_name_containing(&self, fragment: &str) -> ProductResult<Vec<Product>> {
        let models = entity::Entity::find()
            .filter(Expr::col(entity::Column::ProductName).ilike(contains_pattern(fragment)))
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_code(&self, code: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::ProductCode.eq(code))
            .order_by_asc(entity::Column::Id)
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn insert(&self, product: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = product.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn save(&self, product: Product) -> ProductResult<Product> {
        let id = product.id;
        let active_model: entity::ActiveModel = product.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ProductError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(product_id = %id, "Saved product");
        Ok(model.into())
    }

    async fn delete_by_id(&self, id: i64) -> ProductResult<()> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn exists_by_id(&self, id: i64) -> ProductResult<bool> {
        let count = entity::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, active: Option<bool>) -> entity::Model {
        entity::Model {
            id,
            product_code: format!("P{id}"),
            product_name: "Widget".into(),
            description: None,
            price: Decimal::new(999, 2),
            quantity: 5,
            active,
        }
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern("wid"), "%wid%");
    }

    #[tokio::test]
    async fn test_search_uses_plain_ilike() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, Some(true))]])
            .into_connection();
        let repo = PgProductRepository::new(db.clone());

        let found = repo.find_by_name_containing("wid").await.unwrap();
        assert_eq!(found.len(), 1);

        let log = format!("{:?}", db.into_transaction_log());
        let log = log.as_str();
        assert!(log.contains("ILIKE $1"), "{log}");
        assert!(!log.contains("ESCAPE"), "{log}");
        assert!(log.contains("%wid%"), "{log}");
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, Some(true))]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(product.product_code, "P1");
        assert_eq!(product.active, Some(true));
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(17, Some(true))]])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let product = repo
            .insert(NewProduct {
                product_code: "P17".into(),
                product_name: "Widget".into(),
                description: None,
                price: Decimal::new(999, 2),
                quantity: 5,
                active: true,
            })
            .await
            .unwrap();
        assert_eq!(product.id, 17);
    }

    #[tokio::test]
    async fn test_delete_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgProductRepository::new(db);

        assert_eq!(repo.delete_by_id(5).await, Err(ProductError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_query_error_maps_to_database() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("relation does not exist".into())])
            .into_connection();
        let repo = PgProductRepository::new(db);

        let err = repo.find_all().await.unwrap_err();
        assert!(matches!(err, ProductError::Database(ref d) if d.as_str().contains("relation does not exist")));
    }
}
