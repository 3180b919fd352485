use crate::{abstract_trait::SessionStoreTrait, domain::session::StorefrontSession};
use async_trait::async_trait;
use chrono::Duration;
use deadpool_redis::{Connection, Pool, redis::AsyncCommands};
use std::sync::Arc;
use tracing::{debug, error};

const KEY_PREFIX: &str = "storefront:session:";

/// Storefront sessions kept in Redis as JSON documents with a sliding TTL.
#[derive(Clone)]
pub struct SessionStore {
    pub pool: Arc<Pool>,
}

impl SessionStore {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    fn key(session_id: &str) -> String {
        format!("{KEY_PREFIX}{session_id}")
    }

    async fn get_conn(&self) -> Option<Connection> {
        match self.pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("❌ Failed to get Redis connection from pool: {e:?}");
                None
            }
        }
    }
}

#[async_trait]
impl SessionStoreTrait for SessionStore {
    async fn save_session(
        &self,
        session_id: &str,
        session: &StorefrontSession,
        ttl: Duration,
    ) -> bool {
        let json_data = match serde_json::to_string(session) {
            Ok(json) => json,
            Err(e) => {
                error!("❌ Failed to serialize session: {e:?}");
                return false;
            }
        };

        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let ttl_secs = ttl.num_seconds().max(1) as u64;
        let result: Result<(), _> = conn
            .set_ex(Self::key(session_id), &json_data, ttl_secs)
            .await;

        match result {
            Ok(()) => {
                debug!("Session saved for session_id: {session_id}");
                true
            }
            Err(e) => {
                error!("❌ Failed to save session {session_id}: {e:?}");
                false
            }
        }
    }

    async fn get_session(&self, session_id: &str) -> Option<StorefrontSession> {
        let mut conn = self.get_conn().await?;
        let result: Result<Option<String>, _> = conn.get(Self::key(session_id)).await;

        match result {
            Ok(Some(data)) => match serde_json::from_str::<StorefrontSession>(&data) {
                Ok(session) => {
                    debug!("Session retrieved for session_id: {session_id}");
                    Some(session)
                }
                Err(e) => {
                    error!("❌ Failed to deserialize session {session_id}: {e:?}");
                    None
                }
            },
            Ok(None) => {
                debug!("Session not found: {session_id}");
                None
            }
            Err(e) => {
                error!("❌ Redis get error for session {session_id}: {e:?}");
                None
            }
        }
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let result: Result<(), _> = conn.del(Self::key(session_id)).await;
        match result {
            Ok(()) => {
                debug!("Session deleted: {session_id}");
                true
            }
            Err(e) => {
                error!("❌ Failed to delete session {session_id}: {e:?}");
                false
            }
        }
    }

    async fn refresh_session(&self, session_id: &str, ttl: Duration) -> bool {
        let Some(mut conn) = self.get_conn().await else {
            return false;
        };

        let result: Result<bool, _> = conn.expire(Self::key(session_id), ttl.num_seconds()).await;
        match result {
            Ok(_) => {
                debug!("Session TTL refreshed for session_id: {session_id}");
                true
            }
            Err(e) => {
                error!("❌ Failed to refresh session TTL {session_id}: {e:?}");
                false
            }
        }
    }
}
