use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{ApiResponse, AppError, IdPath, JsonBody, RouteFailure};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductError;
use crate::models::{ProductRequest, ProductResponse, SearchParams};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "Products";

/// OpenAPI documentation for the products routes
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        get_product,
        list_products,
        list_active_products,
        search_products,
        update_product,
        delete_product,
        deactivate_product,
        get_product_by_code,
    ),
    components(schemas(ProductRequest, ProductResponse)),
    tags(
        (name = TAG, description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Routes relative to the `/products` mount point
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/create", post(create_product))
        .route("/all", get(list_products))
        .route("/active/list", get(list_active_products))
        .route("/search", get(search_products))
        .route("/code/{code}", get(get_product_by_code))
        .route("/update/{id}", put(update_product))
        .route("/deactivate/{id}", put(deactivate_product))
        .route("/delete/{id}", delete(delete_product))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// Binds a domain error to the failure status of the route that produced it.
fn fail(status: StatusCode) -> impl FnOnce(ProductError) -> RouteFailure {
    move |err| AppError::from(err).with_status(status)
}

/// Create a product
#[utoipa::path(
    post,
    path = "/create",
    tag = TAG,
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failed or malformed body", body = ApiResponse<ProductResponse>)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(input): JsonBody<ProductRequest>,
) -> Result<impl IntoResponse, RouteFailure> {
    let product = service
        .create_product(input)
        .await
        .map_err(fail(StatusCode::BAD_REQUEST))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Product created successfully", product)),
    ))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Id is not a number"),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<ProductResponse>>, RouteFailure> {
    let product = service
        .get_product(id)
        .await
        .map_err(fail(StatusCode::NOT_FOUND))?;
    Ok(Json(ApiResponse::data(product)))
}

/// List every product
#[utoipa::path(
    get,
    path = "/all",
    tag = TAG,
    responses(
        (status = 200, description = "All products with their count", body = ApiResponse<Vec<ProductResponse>>)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, RouteFailure> {
    let products = service
        .list_products()
        .await
        .map_err(fail(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(ApiResponse::list(products)))
}

/// List active products
#[utoipa::path(
    get,
    path = "/active/list",
    tag = TAG,
    responses(
        (status = 200, description = "Products whose active flag is true", body = ApiResponse<Vec<ProductResponse>>)
    )
)]
async fn list_active_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, RouteFailure> {
    let products = service
        .list_active_products()
        .await
        .map_err(fail(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(ApiResponse::list(products)))
}

/// Search products by name
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Products whose name contains the fragment, ignoring case", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, description = "productName is missing")
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<ProductResponse>>>, RouteFailure> {
    let Query(params) = query.map_err(|e| AppError::from(e).with_status(StatusCode::BAD_REQUEST))?;

    let products = service
        .search_products(&params.product_name)
        .await
        .map_err(fail(StatusCode::INTERNAL_SERVER_ERROR))?;
    Ok(Json(ApiResponse::list(products)))
}

/// Replace every field of a product
#[utoipa::path(
    put,
    path = "/update/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated successfully", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation failed or product not found")
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductRequest>,
) -> Result<Json<ApiResponse<ProductResponse>>, RouteFailure> {
    let product = service
        .update_product(id, input)
        .await
        .map_err(fail(StatusCode::BAD_REQUEST))?;
    Ok(Json(ApiResponse::with_message(
        "Product updated successfully",
        product,
    )))
}

/// Delete a product permanently
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted successfully"),
        (status = 404, description = "Product not found")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<()>>, RouteFailure> {
    service
        .delete_product(id)
        .await
        .map_err(fail(StatusCode::NOT_FOUND))?;
    Ok(Json(ApiResponse::message("Product deleted successfully")))
}

/// Mark a product inactive
#[utoipa::path(
    put,
    path = "/deactivate/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deactivated successfully", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found")
    )
)]
async fn deactivate_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> Result<Json<ApiResponse<ProductResponse>>, RouteFailure> {
    let product = service
        .deactivate_product(id)
        .await
        .map_err(fail(StatusCode::NOT_FOUND))?;
    Ok(Json(ApiResponse::with_message(
        "Product deactivated successfully",
        product,
    )))
}

/// Get a product by its product code
#[utoipa::path(
    get,
    path = "/code/{code}",
    tag = TAG,
    params(
        ("code" = String, Path, description = "Product code")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 404, description = "No product carries this code")
    )
)]
async fn get_product_by_code<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<ProductResponse>>, RouteFailure> {
    let product = service
        .get_product_by_code(&code)
        .await
        .map_err(fail(StatusCode::NOT_FOUND))?;
    Ok(Json(ApiResponse::data(product)))
}
