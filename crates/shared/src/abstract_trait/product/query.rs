use crate::{
    domain::{
        requests::FindAllProducts,
        responses::{ApiResponse, ApiResponsePagination, ProductListResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::Product,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;

/// Listing filter. A category takes precedence over the text search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductFilter<'a> {
    pub category_id: Option<i32>,
    pub search: Option<&'a str>,
}

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    async fn count(&self, filter: ProductFilter<'_>) -> Result<i64, RepositoryError>;
    async fn find_page(
        &self,
        filter: ProductFilter<'_>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError>;
    async fn find_available_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;
    async fn find_available_by_id_and_slug(
        &self,
        id: i32,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        req: &FindAllProducts,
        category_slug: Option<&str>,
    ) -> Result<ApiResponsePagination<ProductListResponse>, ServiceError>;
    async fn find_detail(
        &self,
        id: i32,
        slug: &str,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
