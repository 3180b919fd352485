use crate::{
    abstract_trait::ResetTokenCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateResetTokenRequest, errors::RepositoryError, model::ResetToken,
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct ResetTokenCommandRepository {
    db: ConnectionPool,
}

impl ResetTokenCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResetTokenCommandRepositoryTrait for ResetTokenCommandRepository {
    async fn create_reset_token(
        &self,
        request: &CreateResetTokenRequest,
    ) -> Result<ResetToken, RepositoryError> {
        let token = sqlx::query_as::<_, ResetToken>(
            r#"
            INSERT INTO reset_tokens (user_id, token, expired_date)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET token = EXCLUDED.token, expired_date = EXCLUDED.expired_date
            RETURNING reset_token_id, user_id, token, expired_date
            "#,
        )
        .bind(request.user_id)
        .bind(&request.token)
        .bind(request.expired_date)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to store reset token for user ID {}: {err:?}", request.user_id);
            RepositoryError::from_constraint(err)
        })?;

        info!("🔐 Reset token issued for user ID {}", request.user_id);
        Ok(token)
    }

    async fn delete_reset_token(&self, user_id: i32) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM reset_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to delete reset token for user ID {user_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        Ok(())
    }
}
