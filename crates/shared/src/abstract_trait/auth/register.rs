use crate::{
    domain::{
        requests::RegisterRequest,
        responses::{ApiResponse, TokenResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynRegisterService = Arc<dyn RegisterServiceTrait + Send + Sync>;

#[async_trait]
pub trait RegisterServiceTrait {
    async fn register(
        &self,
        register_request: &RegisterRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError>;
}
