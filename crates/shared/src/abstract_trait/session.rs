use crate::domain::session::StorefrontSession;
use async_trait::async_trait;
use chrono::Duration;
use std::sync::Arc;

pub type DynSessionStore = Arc<dyn SessionStoreTrait + Send + Sync>;

#[async_trait]
pub trait SessionStoreTrait {
    async fn save_session(
        &self,
        session_id: &str,
        session: &StorefrontSession,
        ttl: Duration,
    ) -> bool;
    async fn get_session(&self, session_id: &str) -> Option<StorefrontSession>;
    async fn delete_session(&self, session_id: &str) -> bool;
    async fn refresh_session(&self, session_id: &str, ttl: Duration) -> bool;
}
