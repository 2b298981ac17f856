use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Prices are stored as NUMERIC(19,2); rounding matches Postgres.
fn to_cents(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn positive(value: &Decimal) -> Result<(), ValidationError> {
    let cents = to_cents(*value);
    if cents.is_sign_negative() || cents.is_zero() {
        return Err(ValidationError::new("not_positive"));
    }
    Ok(())
}

/// A stored product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    /// `None` only after an update that omitted `active`
    pub active: Option<bool>,
}

/// A product that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_code: String,
    pub product_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub active: bool,
}

/// Request body for create and update.
///
/// Every member is optional on the wire so that a missing field surfaces as a
/// validation message rather than a JSON decoding error. A supplied `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub id: Option<i64>,
    #[validate(
        required(message = "Product code is required"),
        custom(function = "not_blank", message = "Product code is required")
    )]
    #[schema(example = "P1")]
    pub product_code: Option<String>,
    #[validate(
        required(message = "Product name is required"),
        custom(function = "not_blank", message = "Product name is required")
    )]
    #[schema(example = "Widget")]
    pub product_name: Option<String>,
    pub description: Option<String>,
    #[validate(
        required(message = "Price is required"),
        custom(function = "positive", message = "Price must be greater than 0")
    )]
    #[schema(example = 9.99)]
    pub price: Option<Decimal>,
    #[validate(
        required(message = "Quantity is required"),
        range(min = 1, message = "Quantity must be greater than 0")
    )]
    #[schema(example = 5)]
    pub quantity: Option<i32>,
    pub active: Option<bool>,
}

/// Product as returned to clients; every member is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub product_code: String,
    pub product_name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
    pub active: Option<bool>,
}

/// Query string for `GET /products/search`
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchParams {
    /// Case-insensitive fragment of the product name
    pub product_name: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            product_code: product.product_code,
            product_name: product.product_name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            active: product.active,
        }
    }
}

/// Required members of a request, or the validation error naming the missing ones.
fn required_fields(request: &ProductRequest) -> ProductResult<(String, String, Decimal, i32)> {
    match (
        &request.product_code,
        &request.product_name,
        request.price,
        request.quantity,
    ) {
        (Some(code), Some(name), Some(price), Some(quantity)) => {
            Ok((code.clone(), name.clone(), to_cents(price), quantity))
        }
        _ => Err(request
            .validate()
            .err()
            .map(ProductError::from)
            .unwrap_or_else(|| ProductError::Validation("Required field missing".to_string()))),
    }
}

/// Creation path: `active` defaults to `true` when omitted.
impl TryFrom<ProductRequest> for NewProduct {
    type Error = ProductError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        let (product_code, product_name, price, quantity) = required_fields(&request)?;

        Ok(Self {
            product_code,
            product_name,
            description: request.description,
            price,
            quantity,
            active: request.active.unwrap_or(true),
        })
    }
}

impl NewProduct {
    /// Attach the id assigned by storage.
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            product_code: self.product_code,
            product_name: self.product_name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
            active: Some(self.active),
        }
    }
}

impl Product {
    /// Update path: every mutable field is replaced, `active` included.
    pub fn replace_with(&mut self, request: ProductRequest) -> ProductResult<()> {
        let (product_code, product_name, price, quantity) = required_fields(&request)?;

        self.product_code = product_code;
        self.product_name = product_name;
        self.description = request.description;
        self.price = price;
        self.quantity = quantity;
        self.active = request.active;
        Ok(())
    }
}
