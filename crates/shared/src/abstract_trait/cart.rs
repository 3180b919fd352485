use crate::{
    domain::{
        requests::AddressRequest,
        responses::{ApiResponse, CartResponse, CheckoutResponse},
        session::StorefrontSession,
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynCartService = Arc<dyn CartServiceTrait + Send + Sync>;

/// Cart operations consume the caller's session and return the one to persist.
#[async_trait]
pub trait CartServiceTrait {
    async fn view_cart(
        &self,
        session: &StorefrontSession,
    ) -> Result<ApiResponse<CartResponse>, ServiceError>;
    async fn add_to_cart(
        &self,
        session: StorefrontSession,
        product_id: i32,
        quantity: i32,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError>;
    async fn remove_from_cart(
        &self,
        session: StorefrontSession,
        product_id: i32,
        remove_quantity: i32,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError>;
    async fn apply_promo_code(
        &self,
        session: StorefrontSession,
        code: &str,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError>;
    async fn checkout(
        &self,
        session: StorefrontSession,
        address: &AddressRequest,
        user_id: Option<i32>,
    ) -> Result<(StorefrontSession, ApiResponse<CheckoutResponse>), ServiceError>;
}
