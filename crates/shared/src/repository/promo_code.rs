use crate::{
    abstract_trait::PromoCodeQueryRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::PromoCode,
};
use async_trait::async_trait;
use tracing::error;

#[derive(Clone)]
pub struct PromoCodeQueryRepository {
    db: ConnectionPool,
}

impl PromoCodeQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PromoCodeQueryRepositoryTrait for PromoCodeQueryRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError> {
        sqlx::query_as::<_, PromoCode>(
            r#"
            SELECT promo_code_id, promo_code, discount, expires_at, usage_limit, used_count
            FROM promo_codes
            WHERE promo_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch promo code {code}: {err:?}");
            RepositoryError::from(err)
        })
    }
}
