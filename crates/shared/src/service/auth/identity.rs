use crate::{
    abstract_trait::{DynUserQueryRepository, IdentityServiceTrait},
    domain::responses::{ApiResponse, UserResponse},
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

pub struct IdentityService {
    query: DynUserQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl IdentityService {
    pub async fn new(query: DynUserQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics =
            register_service_metrics(&registry, "identity_service", "IdentityService").await;

        Self { query, metrics }
    }
}

#[async_trait]
impl IdentityServiceTrait for IdentityService {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        let ctx = OperationContext::start("GetMe", Method::Get);

        match self.query.find_by_id(user_id).await {
            Ok(Some(user)) => {
                ctx.success(&self.metrics, "User found").await;
                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            }
            Ok(None) => {
                ctx.failure(&self.metrics, "User not found").await;
                Err(ServiceError::NotFound("User not found".to_string()))
            }
            Err(err) => {
                ctx.failure(&self.metrics, &err.to_string()).await;
                Err(err.into())
            }
        }
    }
}
