use crate::{
    domain::{
        requests::{ConfirmPasswordResetRequest, ForgotPasswordRequest},
        responses::ApiResponse,
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPasswordResetService = Arc<dyn PasswordResetServiceTrait + Send + Sync>;

#[async_trait]
pub trait PasswordResetServiceTrait {
    async fn forgot(&self, request: &ForgotPasswordRequest)
    -> Result<ApiResponse<bool>, ServiceError>;
    async fn reset_password(
        &self,
        request: &ConfirmPasswordResetRequest,
    ) -> Result<ApiResponse<bool>, ServiceError>;
}
