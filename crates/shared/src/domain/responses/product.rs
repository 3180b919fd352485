use super::CategoryResponse;
use crate::model::Product;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub category_id: i32,
    pub user_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: i64,
    pub available: bool,
    pub url: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            url: format!("/api/products/{}/{}", value.product_id, value.slug),
            id: value.product_id,
            category_id: value.category_id,
            user_id: value.user_id,
            name: value.name,
            slug: value.slug,
            description: value.description,
            price: value.price,
            available: value.available,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

/// One page of the product listing together with the sidebar categories.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub categories: Vec<CategoryResponse>,
    pub search_query: Option<String>,
}
