use crate::state::AppState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::{
    abstract_trait::{DynCategoryQueryService, DynProductQueryService},
    domain::{
        requests::FindAllProducts,
        responses::{
            ApiResponse, ApiResponsePagination, CategoryResponse, ProductListResponse,
            ProductResponse,
        },
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses(
        (status = 200, description = "All categories", body = ApiResponse<Vec<CategoryResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_categories(
    Extension(service): Extension<DynCategoryQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    params(FindAllProducts),
    responses(
        (status = 200, description = "Paginated products, optionally filtered by search", body = ApiResponsePagination<ProductListResponse>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params, None).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{slug}/products",
    tag = "Catalog",
    params(
        ("slug" = String, Path, description = "Category slug"),
        FindAllProducts
    ),
    responses(
        (status = 200, description = "Paginated products of the category", body = ApiResponsePagination<ProductListResponse>),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category_products(
    Extension(service): Extension<DynProductQueryService>,
    Path(slug): Path<String>,
    Query(params): Query<FindAllProducts>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(&params, Some(&slug)).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/{slug}",
    tag = "Catalog",
    params(
        ("id" = i32, Path, description = "Product ID"),
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product details", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found or unavailable")
    )
)]
pub async fn get_product_detail(
    Extension(service): Extension<DynProductQueryService>,
    Path((id, slug)): Path<(i32, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_detail(id, &slug).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn catalog_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/categories", get(get_categories))
        .route("/api/categories/{slug}/products", get(get_category_products))
        .route("/api/products", get(get_products))
        .route("/api/products/{id}/{slug}", get(get_product_detail))
        .layer(Extension(app_state.di_container.category_service.clone()))
        .layer(Extension(app_state.di_container.product_service.query.clone()))
}
