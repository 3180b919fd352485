use crate::{
    domain::requests::CreateUserRequest,
    errors::RepositoryError,
    model::{Customer, User},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;
pub type DynCustomerRepository = Arc<dyn CustomerRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    /// Inserts the user and its customer record in one transaction.
    async fn create_user_with_customer(
        &self,
        req: &CreateUserRequest,
    ) -> Result<(User, Customer), RepositoryError>;
    async fn update_password(&self, user_id: i32, hashed: &str) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait CustomerRepositoryTrait {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Customer>, RepositoryError>;
}
