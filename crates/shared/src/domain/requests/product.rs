use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(range(min = 1, message = "Category is required"))]
    #[schema(example = 1)]
    pub category_id: i32,

    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    #[schema(example = "Linen shirt")]
    pub name: String,

    /// Derived from the name when left blank.
    #[serde(default)]
    #[validate(length(max = 200))]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 1999)]
    pub price: i64,

    #[serde(default = "default_available")]
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(skip)]
    pub id: i32,

    #[validate(range(min = 1, message = "Category is required"))]
    pub category_id: i32,

    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 200))]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0, message = "Price cannot be negative"))]
    pub price: i64,

    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}
