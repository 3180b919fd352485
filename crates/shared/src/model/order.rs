use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ORDER_STATUS_PENDING: &str = "Pending";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub order_id: i32,
    pub address_id: i32,
    pub customer_id: Option<i32>,
    pub product_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub house: String,
    pub apartment: String,
    pub quantity: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}
