use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub quantity: i32,
}

/// Per-visitor state kept in the session store.
///
/// The cart is keyed by the product id rendered as a string, which is also
/// how it is laid out in the stored JSON document. Cart operations take the
/// session by value and hand back the updated one; nothing mutates it behind
/// the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontSession {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub cart: BTreeMap<String, CartEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

impl StorefrontSession {
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn quantity_of(&self, product_id: i32) -> Option<i32> {
        self.cart.get(&product_id.to_string()).map(|entry| entry.quantity)
    }

    /// Product ids held in the cart. Keys that are not ids are skipped.
    pub fn product_ids(&self) -> Vec<i32> {
        self.cart
            .keys()
            .filter_map(|key| key.parse::<i32>().ok())
            .collect()
    }

    pub fn with_added(mut self, product_id: i32, quantity: i32) -> Self {
        self.cart
            .entry(product_id.to_string())
            .and_modify(|entry| entry.quantity = entry.quantity.saturating_add(quantity))
            .or_insert(CartEntry { quantity });
        self
    }

    pub fn with_removed(mut self, product_id: i32, remove_quantity: i32) -> Self {
        let key = product_id.to_string();
        if let Some(entry) = self.cart.get_mut(&key) {
            if entry.quantity <= remove_quantity {
                self.cart.remove(&key);
            } else {
                entry.quantity -= remove_quantity;
            }
        }
        self
    }

    pub fn with_promo_code(mut self, code: impl Into<String>) -> Self {
        self.promo_code = Some(code.into());
        self
    }

    /// Drops the cart and the promo code after a completed checkout.
    pub fn cleared(mut self) -> Self {
        self.cart.clear();
        self.promo_code = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_adds_accumulate_quantity() {
        let session = StorefrontSession::default()
            .with_added(7, 1)
            .with_added(7, 2)
            .with_added(3, 1);

        assert_eq!(session.quantity_of(7), Some(3));
        assert_eq!(session.quantity_of(3), Some(1));
    }

    #[test]
    fn remove_decrements_or_deletes() {
        let session = StorefrontSession::default().with_added(7, 5);

        let session = session.with_removed(7, 2);
        assert_eq!(session.quantity_of(7), Some(3));

        let session = session.with_removed(7, 3);
        assert_eq!(session.quantity_of(7), None);
    }

    #[test]
    fn removing_unknown_product_is_a_no_op() {
        let session = StorefrontSession::default().with_added(1, 2);
        assert_eq!(session.clone().with_removed(99, 1), session);
        assert_eq!(
            StorefrontSession::default().with_removed(1, 1),
            StorefrontSession::default()
        );
    }

    #[test]
    fn cleared_drops_cart_and_promo() {
        let session = StorefrontSession::default()
            .with_added(1, 1)
            .with_promo_code("SPRING5")
            .cleared();

        assert!(session.is_cart_empty());
        assert!(session.promo_code.is_none());
    }

    #[test]
    fn stored_layout_uses_string_keys() {
        let session = StorefrontSession::default()
            .with_added(12, 2)
            .with_promo_code("SPRING5");
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"cart": {"12": {"quantity": 2}}, "promo_code": "SPRING5"})
        );

        let parsed: StorefrontSession = serde_json::from_str(r#"{"cart":{"x":{"quantity":1},"4":{"quantity":2}}}"#).unwrap();
        assert_eq!(parsed.product_ids(), vec![4]);
    }
}
