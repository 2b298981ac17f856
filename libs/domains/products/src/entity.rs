use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{NewProduct, Product};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 2)))")]
    pub price: Decimal,
    pub quantity: i32,
    pub active: Option<bool>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            product_code: model.product_code,
            product_name: model.product_name,
            description: model.description,
            price: model.price,
            quantity: model.quantity,
            active: model.active,
        }
    }
}

// Insert: the id is left to the BIGSERIAL sequence.
impl From<NewProduct> for ActiveModel {
    fn from(input: NewProduct) -> Self {
        ActiveModel {
            id: NotSet,
            product_code: Set(input.product_code),
            product_name: Set(input.product_name),
            description: Set(input.description),
            price: Set(input.price),
            quantity: Set(input.quantity),
            active: Set(Some(input.active)),
        }
    }
}

// Update: every column is written.
impl From<Product> for ActiveModel {
    fn from(product: Product) -> Self {
        ActiveModel {
            id: Set(product.id),
            product_code: Set(product.product_code),
            product_name: Set(product.product_name),
            description: Set(product.description),
            price: Set(product.price),
            quantity: Set(product.quantity),
            active: Set(product.active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_leaves_id_unset() {
        let active: ActiveModel = NewProduct {
            product_code: "P1".into(),
            product_name: "Widget".into(),
            description: None,
            price: Decimal::new(999, 2),
            quantity: 5,
            active: true,
        }
        .into();

        assert!(active.id.is_not_set());
        assert_eq!(active.active, Set(Some(true)));
    }

    #[test]
    fn test_model_round_trips_to_product() {
        let model = Model {
            id: 3,
            product_code: "P3".into(),
            product_name: "Bolt".into(),
            description: Some("M6".into()),
            price: Decimal::new(25, 2),
            quantity: 100,
            active: None,
        };

        let product = Product::from(model.clone());
        assert_eq!(product.id, 3);
        assert_eq!(product.active, None);

        let active: ActiveModel = product.into();
        assert_eq!(active.id, Set(3));
        assert_eq!(active.description, Set(Some("M6".to_string())));
    }
}
