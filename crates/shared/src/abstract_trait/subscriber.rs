use crate::{
    domain::{
        requests::SubscribeRequest,
        responses::{ApiResponse, SubscriberResponse},
    },
    errors::{RepositoryError, ServiceError},
    model::SubscribedUser,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynSubscriberRepository = Arc<dyn SubscriberRepositoryTrait + Send + Sync>;
pub type DynSubscriberService = Arc<dyn SubscriberServiceTrait + Send + Sync>;

#[async_trait]
pub trait SubscriberRepositoryTrait {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscribedUser>, RepositoryError>;
    async fn create(&self, name: &str, email: &str) -> Result<SubscribedUser, RepositoryError>;
}

#[async_trait]
pub trait SubscriberServiceTrait {
    async fn subscribe(
        &self,
        req: &SubscribeRequest,
    ) -> Result<ApiResponse<SubscriberResponse>, ServiceError>;
}
