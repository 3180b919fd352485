use crate::{
    abstract_trait::{
        DynCategoryQueryRepository, DynProductQueryRepository, ProductFilter,
        ProductQueryServiceTrait,
    },
    domain::{
        requests::FindAllProducts,
        responses::{
            ApiResponse, ApiResponsePagination, CategoryResponse, Pagination, ProductListResponse,
            ProductResponse,
        },
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    categories: DynCategoryQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl ProductQueryService {
    pub async fn new(
        query: DynProductQueryRepository,
        categories: DynCategoryQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics =
            register_service_metrics(&registry, "product_query_service", "ProductQueryService")
                .await;

        Self {
            query,
            categories,
            metrics,
        }
    }

    async fn list(
        &self,
        req: &FindAllProducts,
        category_slug: Option<&str>,
    ) -> Result<ApiResponsePagination<ProductListResponse>, ServiceError> {
        let filter = match category_slug {
            Some(slug) => {
                let category = self
                    .categories
                    .find_by_slug(slug)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Category not found".to_string()))?;

                ProductFilter {
                    category_id: Some(category.category_id),
                    search: None,
                }
            }
            None => ProductFilter {
                category_id: None,
                search: req.search(),
            },
        };

        let total = self.query.count(filter).await?;
        let pagination = Pagination::resolve(req.page.as_deref(), req.page_size(), total);

        let products = self
            .query
            .find_page(filter, pagination.page_size, pagination.offset())
            .await?;
        let categories = self.categories.find_all().await?;

        info!(
            "📦 Listing page {}/{} ({} of {total} products)",
            pagination.page,
            pagination.total_pages,
            products.len()
        );

        Ok(ApiResponsePagination {
            status: "success".to_string(),
            message: "Products retrieved successfully".to_string(),
            data: ProductListResponse {
                products: products.into_iter().map(ProductResponse::from).collect(),
                categories: categories.into_iter().map(CategoryResponse::from).collect(),
                search_query: req.q.clone(),
            },
            pagination,
        })
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
        category_slug: Option<&str>,
    ) -> Result<ApiResponsePagination<ProductListResponse>, ServiceError> {
        let ctx = OperationContext::start("FindAllProducts", Method::Get);

        let result = self.list(req, category_slug).await;
        match &result {
            Ok(_) => ctx.success(&self.metrics, "Products listed").await,
            Err(err) => ctx.failure(&self.metrics, &err.to_string()).await,
        }
        result
    }

    async fn find_detail(
        &self,
        id: i32,
        slug: &str,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        let ctx = OperationContext::start("FindProductDetail", Method::Get);

        match self.query.find_available_by_id_and_slug(id, slug).await {
            Ok(Some(product)) => {
                ctx.success(&self.metrics, "Product found").await;
                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product),
                ))
            }
            Ok(None) => {
                ctx.failure(&self.metrics, "Product not found").await;
                Err(ServiceError::NotFound("Product not found".to_string()))
            }
            Err(err) => {
                ctx.failure(&self.metrics, &err.to_string()).await;
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryCategories, InMemoryProducts, product, registry};

    async fn service() -> ProductQueryService {
        let mut shirt = product(1, "Linen Shirt", 10);
        shirt.description = "Breathable summer wear".into();
        let mut mug = product(4, "Enamel Mug", 8);
        mug.category_id = 2;

        let products = InMemoryProducts::with(vec![
            shirt,
            product(2, "Wool Socks", 5),
            product(3, "Summer Hat", 7),
            mug,
        ]);
        let categories =
            InMemoryCategories::with(&[(1, "Clothes", "clothes"), (2, "Kitchen", "kitchen")]);

        ProductQueryService::new(products, categories, registry()).await
    }

    fn page(q: Option<&str>, page: Option<&str>) -> FindAllProducts {
        FindAllProducts {
            q: q.map(str::to_string),
            page: page.map(str::to_string),
            page_size: 2,
        }
    }

    #[tokio::test]
    async fn search_matches_name_or_description_case_insensitively() {
        let service = service().await;

        let response = service.find_all(&page(Some("SUMMER"), None), None).await.unwrap();
        let ids: Vec<i32> = response.data.products.iter().map(|p| p.id).collect();

        assert_eq!(ids, vec![1, 3]);
        assert_eq!(response.data.search_query.as_deref(), Some("SUMMER"));
        assert_eq!(response.pagination.total_items, 2);
    }

    #[tokio::test]
    async fn category_listing_ignores_search_and_requires_known_slug() {
        let service = service().await;

        let response = service
            .find_all(&page(Some("socks"), None), Some("kitchen"))
            .await
            .unwrap();
        assert_eq!(response.data.products.len(), 1);
        assert_eq!(response.data.products[0].id, 4);
        assert_eq!(response.data.categories.len(), 2);

        let missing = service.find_all(&page(None, None), Some("garden")).await;
        assert!(matches!(missing, Err(ServiceError::NotFound(_))), "got {missing:?}");
    }

    #[tokio::test]
    async fn bad_page_numbers_are_resolved() {
        let service = service().await;

        let first = service.find_all(&page(None, Some("abc")), None).await.unwrap();
        assert_eq!(first.pagination.page, 1);
        assert_eq!(first.data.products.len(), 2);

        let last = service.find_all(&page(None, Some("99")), None).await.unwrap();
        assert_eq!(last.pagination.page, 2);
        assert_eq!(last.pagination.total_pages, 2);
        assert_eq!(last.data.products.len(), 2);
    }

    #[tokio::test]
    async fn detail_requires_matching_slug_and_availability() {
        let service = service().await;

        let found = service.find_detail(2, "wool-socks").await.unwrap();
        assert_eq!(found.data.name, "Wool Socks");

        let wrong_slug = service.find_detail(2, "socks").await;
        assert!(matches!(wrong_slug, Err(ServiceError::NotFound(_))), "got {wrong_slug:?}");
    }
}
