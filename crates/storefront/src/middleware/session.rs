use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Duration;
use shared::{
    abstract_trait::DynSessionStore,
    domain::session::StorefrontSession,
    errors::{HttpError, ServiceError},
    utils::generate_random_string,
};
use tracing::{debug, error, warn};

pub const SESSION_COOKIE: &str = "sessionid";

const SESSION_ID_LENGTH: usize = 32;

/// The visitor's session as loaded for the current request.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: String,
    pub data: StorefrontSession,
}

#[derive(Clone)]
pub struct SessionManager {
    store: DynSessionStore,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(store: DynSessionStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    async fn load(&self, session_id: &str) -> Option<StorefrontSession> {
        let session = self.store.get_session(session_id).await?;
        self.store.refresh_session(session_id, self.ttl).await;
        Some(session)
    }

    /// Writes the session back; last write wins.
    pub async fn save(&self, session_id: &str, session: &StorefrontSession) -> Result<(), HttpError> {
        if self.store.save_session(session_id, session, self.ttl).await {
            Ok(())
        } else {
            error!("❌ Could not persist session {session_id}");
            Err(ServiceError::Session("Failed to save session".to_string()).into())
        }
    }

    /// Persists a session after a change that cannot be undone. A failed
    /// write drops the stored session instead of failing the request.
    pub async fn save_or_flush(&self, session_id: &str, session: &StorefrontSession) {
        if self.save(session_id, session).await.is_err() {
            warn!("⚠️ Dropping session {session_id} after failed save");
            self.flush(session_id).await;
        }
    }

    pub async fn flush(&self, session_id: &str) {
        if !self.store.delete_session(session_id).await {
            debug!("Session {session_id} was not deleted");
        }
    }
}

fn session_cookie(id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Loads the visitor's session from the `sessionid` cookie, or starts an
/// empty one and issues the cookie on the response.
pub async fn session_middleware(
    cookie_jar: CookieJar,
    Extension(manager): Extension<SessionManager>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let existing = match cookie_jar.get(SESSION_COOKIE) {
        Some(cookie) => {
            let id = cookie.value().to_string();
            manager.load(&id).await.map(|data| SessionContext { id, data })
        }
        None => None,
    };

    let (context, is_new) = match existing {
        Some(context) => (context, false),
        None => {
            let id = generate_random_string(SESSION_ID_LENGTH)
                .map_err(|e| HttpError::Internal(format!("Failed to create session id: {e}")))?;
            debug!("Starting new storefront session");
            (
                SessionContext {
                    id,
                    data: StorefrontSession::default(),
                },
                true,
            )
        }
    };

    let id = context.id.clone();
    req.extensions_mut().insert(manager);
    req.extensions_mut().insert(context);

    let response = next.run(req).await;

    if is_new {
        Ok((cookie_jar.add(session_cookie(id)), response).into_response())
    } else {
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::test_support::InMemorySessionStore;
    use std::sync::Arc;

    fn manager(store: Arc<InMemorySessionStore>) -> SessionManager {
        SessionManager::new(store, Duration::minutes(5))
    }

    #[tokio::test]
    async fn load_refreshes_known_sessions_only() {
        let store = Arc::new(InMemorySessionStore::default());
        let manager = manager(store.clone());
        manager
            .save("abc", &StorefrontSession::default().with_added(3, 2))
            .await
            .unwrap();

        assert_eq!(manager.load("abc").await.unwrap().quantity_of(3), Some(2));
        assert!(manager.load("missing").await.is_none());
        assert_eq!(*store.refreshed.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn failed_save_is_service_unavailable() {
        let store = Arc::new(InMemorySessionStore::default());
        store.fail_saves();

        let result = manager(store)
            .save("abc", &StorefrontSession::default())
            .await;

        assert!(matches!(result, Err(HttpError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn save_or_flush_drops_stale_session_when_save_fails() {
        let store = Arc::new(InMemorySessionStore::default());
        let manager = manager(store.clone());
        manager
            .save("abc", &StorefrontSession::default().with_added(1, 2))
            .await
            .unwrap();
        store.fail_saves();

        manager
            .save_or_flush("abc", &StorefrontSession::default())
            .await;

        assert!(store.session("abc").is_none());
    }

    #[tokio::test]
    async fn flush_drops_cart_and_promo_code() {
        let store = Arc::new(InMemorySessionStore::default());
        let manager = manager(store.clone());
        let session = StorefrontSession::default()
            .with_added(1, 1)
            .with_promo_code("SPRING5".to_string());
        manager.save("abc", &session).await.unwrap();

        manager.flush("abc").await;

        assert!(store.sessions.lock().unwrap().is_empty());
    }

    #[test]
    fn session_cookie_is_http_only_for_whole_site() {
        let cookie = session_cookie("abc".to_string());

        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
