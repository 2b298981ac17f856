//! Products Domain
//!
//! CRUD over the `products` table: models and their translations, a storage
//! trait with Postgres and in-memory implementations, the service holding the
//! business rules, and the HTTP handlers.
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON envelope
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, not-found rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + PgProductRepository / InMemoryProductRepository
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, NewProduct, ProductRequest, ProductResponse
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_products::{handlers, PgProductRepository, ProductService};
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let app = axum::Router::new().nest("/products", handlers::router(service));
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{NewProduct, Product, ProductRequest, ProductResponse, SearchParams};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
