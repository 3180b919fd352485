use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order header written once per checkout, carrying the discounted total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    pub address_id: i32,
    pub customer_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub house: String,
    pub apartment: String,
    pub total_price: i64,
    pub created_at: Option<NaiveDateTime>,
}
