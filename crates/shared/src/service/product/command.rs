use crate::{
    abstract_trait::{DynProductCommandRepository, ProductCommandServiceTrait},
    domain::{
        requests::{CreateProductRequest, UpdateProductRequest},
        responses::{ApiResponse, ProductResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationContext, register_service_metrics, slugify},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct ProductCommandService {
    command: DynProductCommandRepository,
    metrics: Arc<Mutex<Metrics>>,
}

fn resolve_slug(slug: &str, name: &str) -> Result<String, ServiceError> {
    let slug = if slug.trim().is_empty() {
        slugify(name)
    } else {
        slugify(slug)
    };

    if slug.is_empty() {
        return Err(ServiceError::Validation(vec![
            "slug: Enter a slug made of letters, numbers or hyphens".to_string(),
        ]));
    }

    Ok(slug)
}

fn map_repo_error(err: RepositoryError) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::NotFound("Product not found".to_string()),
        RepositoryError::ForeignKey(_) => {
            ServiceError::BadRequest("Select a valid category".to_string())
        }
        other => ServiceError::Repo(other),
    }
}

impl ProductCommandService {
    pub async fn new(command: DynProductCommandRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics =
            register_service_metrics(&registry, "product_command_service", "ProductCommandService")
                .await;

        Self { command, metrics }
    }

    async fn finish<T>(
        &self,
        ctx: OperationContext,
        result: Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(_) => ctx.success(&self.metrics, "ok").await,
            Err(err) => ctx.failure(&self.metrics, &err.to_string()).await,
        }
        result
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
        user_id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = OperationContext::start("CreateProduct", Method::Post);

        let result = async {
            let mut req = req.clone();
            req.slug = resolve_slug(&req.slug, &req.name)?;

            let product = self
                .command
                .create_product(&req, user_id)
                .await
                .map_err(map_repo_error)?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Product saved!",
                ProductResponse::from(product),
            ))
        }
        .await;

        self.finish(ctx, result).await
    }

    async fn update_product(
        &self,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = OperationContext::start("UpdateProduct", Method::Put);

        let result = async {
            let mut req = req.clone();
            req.slug = resolve_slug(&req.slug, &req.name)?;

            let product = self
                .command
                .update_product(&req)
                .await
                .map_err(map_repo_error)?;

            Ok::<_, ServiceError>(ApiResponse::success(
                "Product saved!",
                ProductResponse::from(product),
            ))
        }
        .await;

        self.finish(ctx, result).await
    }

    async fn delete_product(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        let ctx = OperationContext::start("DeleteProduct", Method::Delete);

        let result = self
            .command
            .delete_product(id)
            .await
            .map_err(map_repo_error)
            .map(|()| ApiResponse::success("Product deleted!", ()));

        self.finish(ctx, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryProducts, product, registry};

    fn create(name: &str, slug: &str, category_id: i32) -> CreateProductRequest {
        CreateProductRequest {
            category_id,
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
            price: 1999,
            available: true,
        }
    }

    #[tokio::test]
    async fn create_derives_slug_and_records_owner() {
        let repo = InMemoryProducts::with(Vec::new());
        let service = ProductCommandService::new(repo.clone(), registry()).await;

        let response = service
            .create_product(&create("Linen Shirt XL", "", 1), 7)
            .await
            .unwrap();

        assert_eq!(response.data.slug, "linen-shirt-xl");
        assert_eq!(response.data.user_id, Some(7));
        assert_eq!(repo.products.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_with_unknown_category_is_a_bad_request() {
        let service =
            ProductCommandService::new(InMemoryProducts::with(Vec::new()), registry()).await;

        let result = service.create_product(&create("Mug", "mug", 9), 1).await;

        assert!(matches!(result, Err(ServiceError::BadRequest(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn update_and_delete_report_unknown_ids() {
        let repo = InMemoryProducts::with(vec![product(1, "Linen Shirt", 10)]);
        let service = ProductCommandService::new(repo.clone(), registry()).await;

        let update = UpdateProductRequest {
            id: 5,
            category_id: 1,
            name: "Ghost".into(),
            slug: String::new(),
            description: String::new(),
            price: 1,
            available: true,
        };
        let result = service.update_product(&update).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))), "got {result:?}");

        let result = service.delete_product(5).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))), "got {result:?}");

        service.delete_product(1).await.unwrap();
        assert!(repo.products.lock().unwrap().is_empty());
    }
}
