use crate::{errors::RepositoryError, model::PromoCode};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynPromoCodeQueryRepository = Arc<dyn PromoCodeQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait PromoCodeQueryRepositoryTrait {
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, RepositoryError>;
}
