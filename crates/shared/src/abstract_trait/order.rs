use crate::{
    domain::requests::CreateCheckoutRequest,
    errors::RepositoryError,
    model::{Address, Order},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Writes the address header and all of its orders atomically.
    async fn create_checkout(
        &self,
        req: &CreateCheckoutRequest,
    ) -> Result<(Address, Vec<Order>), RepositoryError>;
}
