use crate::{
    abstract_trait::SubscriberRepositoryTrait, config::ConnectionPool, errors::RepositoryError,
    model::SubscribedUser,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct SubscriberRepository {
    db: ConnectionPool,
}

impl SubscriberRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberRepositoryTrait for SubscriberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscribedUser>, RepositoryError> {
        sqlx::query_as::<_, SubscribedUser>(
            "SELECT subscriber_id, name, email, created_at FROM subscribed_users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch subscriber {email}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn create(&self, name: &str, email: &str) -> Result<SubscribedUser, RepositoryError> {
        let subscriber = sqlx::query_as::<_, SubscribedUser>(
            r#"
            INSERT INTO subscribed_users (name, email, created_at)
            VALUES ($1, $2, current_timestamp)
            RETURNING subscriber_id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to store subscriber {email}: {err:?}");
            RepositoryError::from_constraint(err)
        })?;

        info!("📰 New newsletter subscriber ID {}", subscriber.subscriber_id);
        Ok(subscriber)
    }
}
