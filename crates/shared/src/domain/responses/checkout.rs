use crate::model::{Address, Order};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct AddressResponse {
    pub id: i32,
    pub customer_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub city: String,
    pub house: String,
    pub apartment: String,
    pub total_price: i64,
}

impl From<Address> for AddressResponse {
    fn from(value: Address) -> Self {
        AddressResponse {
            id: value.address_id,
            customer_id: value.customer_id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            city: value.city,
            house: value.house,
            apartment: value.apartment,
            total_price: value.total_price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub address_id: i32,
    pub customer_id: Option<i32>,
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: i64,
    pub status: String,
    pub created_at: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(value: Order) -> Self {
        OrderResponse {
            id: value.order_id,
            address_id: value.address_id,
            customer_id: value.customer_id,
            product_id: value.product_id,
            quantity: value.quantity,
            total_price: value.total_price,
            status: value.status,
            created_at: value.created_at.map(|dt| dt.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct CheckoutResponse {
    pub address: AddressResponse,
    pub orders: Vec<OrderResponse>,
    pub redirect_to: String,
}
