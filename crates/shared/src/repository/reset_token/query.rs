use crate::{
    abstract_trait::ResetTokenQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::ResetToken,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct ResetTokenQueryRepository {
    db: ConnectionPool,
}

impl ResetTokenQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResetTokenQueryRepositoryTrait for ResetTokenQueryRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<ResetToken>, RepositoryError> {
        sqlx::query_as::<_, ResetToken>(
            "SELECT reset_token_id, user_id, token, expired_date FROM reset_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch reset token: {err:?}");
            RepositoryError::from(err)
        })
    }
}
