use crate::{
    abstract_trait::{CategoryQueryServiceTrait, DynCategoryQueryRepository},
    domain::responses::{ApiResponse, CategoryResponse},
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct CategoryService {
    query: DynCategoryQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl CategoryService {
    pub async fn new(query: DynCategoryQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics =
            register_service_metrics(&registry, "category_service", "CategoryService").await;

        Self { query, metrics }
    }
}

#[async_trait]
impl CategoryQueryServiceTrait for CategoryService {
    async fn find_all(&self) -> Result<ApiResponse<Vec<CategoryResponse>>, ServiceError> {
        let ctx = OperationContext::start("FindAllCategories", Method::Get);

        match self.query.find_all().await {
            Ok(categories) => {
                ctx.success(&self.metrics, "Categories retrieved").await;
                Ok(ApiResponse::success(
                    "Categories retrieved successfully",
                    categories.into_iter().map(CategoryResponse::from).collect(),
                ))
            }
            Err(err) => {
                ctx.failure(&self.metrics, &err.to_string()).await;
                Err(err.into())
            }
        }
    }
}
