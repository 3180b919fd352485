use crate::utils::deserialize_quantity;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    #[serde(default = "one", deserialize_with = "deserialize_quantity")]
    #[schema(example = 1)]
    pub quantity: i32,
}

impl Default for AddToCartRequest {
    fn default() -> Self {
        Self { quantity: 1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveFromCartRequest {
    #[serde(default = "one", deserialize_with = "deserialize_quantity")]
    #[schema(example = 1)]
    pub remove_quantity: i32,
}

impl Default for RemoveFromCartRequest {
    fn default() -> Self {
        Self { remove_quantity: 1 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ApplyPromoCodeRequest {
    #[serde(default)]
    #[schema(example = "SPRING5")]
    pub promo_code: String,
}

fn one() -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_defaults_to_one_when_missing_or_garbage() {
        let missing: AddToCartRequest = serde_json::from_str("{}").unwrap();
        let garbage: AddToCartRequest = serde_json::from_str(r#"{"quantity":"lots"}"#).unwrap();
        let negative: RemoveFromCartRequest =
            serde_json::from_str(r#"{"remove_quantity":-3}"#).unwrap();

        assert_eq!(missing.quantity, 1);
        assert_eq!(garbage.quantity, 1);
        assert_eq!(negative.remove_quantity, 1);
    }

    #[test]
    fn quantity_accepts_numbers_and_numeric_strings() {
        let number: AddToCartRequest = serde_json::from_str(r#"{"quantity":4}"#).unwrap();
        let text: AddToCartRequest = serde_json::from_str(r#"{"quantity":" 3 "}"#).unwrap();

        assert_eq!(number.quantity, 4);
        assert_eq!(text.quantity, 3);
    }
}
