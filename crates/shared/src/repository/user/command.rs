use crate::{
    abstract_trait::UserCommandRepositoryTrait, config::ConnectionPool,
    domain::requests::CreateUserRequest, errors::RepositoryError, model::{Customer, User},
};
use async_trait::async_trait;
use tracing::{error, info};

#[derive(Clone)]
pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user_with_customer(
        &self,
        req: &CreateUserRequest,
    ) -> Result<(User, Customer), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|err| {
            error!("❌ Failed to open registration transaction: {err:?}");
            RepositoryError::from(err)
        })?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, first_name, last_name, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING user_id, username, email, first_name, last_name, password,
                      is_staff, is_superuser, created_at, updated_at
            "#,
        )
        .bind(&req.username)
        .bind(&req.email)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.password)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create user {}: {err:?}", req.username);
            RepositoryError::from_constraint(err)
        })?;

        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (user_id, created_at)
            VALUES ($1, current_timestamp)
            RETURNING customer_id, user_id, created_at
            "#,
        )
        .bind(user.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to create customer for user ID {}: {err:?}", user.user_id);
            RepositoryError::from_constraint(err)
        })?;

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit registration of {}: {err:?}", req.username);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created user ID {} ({}) with customer ID {}",
            user.user_id, user.username, customer.customer_id
        );
        Ok((user, customer))
    }

    async fn update_password(&self, user_id: i32, hashed: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET password = $2,
                updated_at = current_timestamp
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(hashed)
        .execute(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update password for user ID {user_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        info!("🔑 Updated password for user ID {user_id}");
        Ok(())
    }
}
