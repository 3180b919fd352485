use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct CartLineResponse {
    pub product_id: i32,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub quantity: i32,
    pub line_total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq, Default)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub subtotal: i64,
    pub discount: i64,
    pub promo_code: Option<String>,
    /// May be negative when the discount exceeds the subtotal.
    pub total: i64,
}
