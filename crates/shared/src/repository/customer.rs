use crate::{
    abstract_trait::CustomerRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::Customer,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct CustomerRepository {
    db: ConnectionPool,
}

impl CustomerRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Customer>, RepositoryError> {
        sqlx::query_as::<_, Customer>(
            "SELECT customer_id, user_id, created_at FROM customers WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch customer for user ID {user_id}: {err:?}");
            RepositoryError::from(err)
        })
    }
}
