use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Delivery and contact data submitted at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct AddressRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "This field is required."))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "This field is required."))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "This field is required."))]
    pub city: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "This field is required."))]
    pub house: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "This field is required."))]
    pub apartment: String,
}

/// One order row to be written for a priced cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product_id: i32,
    pub quantity: i32,
    pub total_price: i64,
}

/// Everything persisted by a single checkout: the address header and its orders.
#[derive(Debug, Clone)]
pub struct CreateCheckoutRequest {
    pub customer_id: Option<i32>,
    pub address: AddressRequest,
    pub total_price: i64,
    pub lines: Vec<NewOrderLine>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_address_reports_every_field() {
        let errors = AddressRequest::default()
            .validate()
            .expect_err("expected field errors");
        let fields = errors.field_errors();

        for field in ["first_name", "last_name", "email", "city", "house", "apartment"] {
            assert!(fields.contains_key(field), "missing error for {field}");
        }
    }
}
