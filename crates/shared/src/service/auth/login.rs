use super::issue_token;
use crate::{
    abstract_trait::{DynHashing, DynJwtService, DynUserQueryRepository, LoginServiceTrait},
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, TokenResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct LoginServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub query: DynUserQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct LoginService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl LoginService {
    pub async fn new(deps: LoginServiceDeps) -> Self {
        let LoginServiceDeps {
            hash,
            jwt,
            query,
            registry,
        } = deps;

        let metrics = register_service_metrics(&registry, "login_service", "LoginService").await;

        Self {
            hash,
            jwt,
            query,
            metrics,
        }
    }
}

#[async_trait]
impl LoginServiceTrait for LoginService {
    async fn login(
        &self,
        request: &LoginRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        let username = request.username.trim();
        info!("🔐 Attempting login for username: {username}");

        let ctx = OperationContext::start("Login", Method::Post);

        let user = match self.query.find_by_username(username).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("❌ Unknown username: {username}");
                ctx.failure(&self.metrics, "Unknown username").await;
                return Err(ServiceError::InvalidCredentials);
            }
            Err(err) => {
                ctx.failure(&self.metrics, "Database error").await;
                return Err(ServiceError::Repo(err));
            }
        };

        if let Err(err) = self
            .hash
            .compare_password(&user.password, &request.password)
            .await
        {
            warn!("❌ Invalid password for username: {username}");
            ctx.failure(&self.metrics, "Invalid password").await;
            return Err(match err {
                ServiceError::Bcrypt(_) => ServiceError::InvalidCredentials,
                other => other,
            });
        }

        match issue_token(&self.jwt, user, &format!("You are now logged in as {username}.")) {
            Ok(response) => {
                ctx.success(&self.metrics, "Login successful").await;
                Ok(response)
            }
            Err(err) => {
                ctx.failure(&self.metrics, "Failed to generate access token").await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{HashingTrait, JwtServiceTrait},
        config::{ACCESS_TOKEN, Hashing, JwtConfig},
        test_support::{InMemoryUsers, registry, user},
    };

    async fn service() -> (LoginService, Arc<JwtConfig>) {
        let hashing = Hashing::with_cost(4);
        let hash = hashing.hash_password("correct horse").await.unwrap();
        let jwt = Arc::new(JwtConfig::new("test-secret"));

        let service = LoginService::new(LoginServiceDeps {
            hash: Arc::new(hashing),
            jwt: jwt.clone(),
            query: InMemoryUsers::with(vec![user(5, "olena", "olena@example.com", &hash)]),
            registry: registry(),
        })
        .await;

        (service, jwt)
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_issue_an_access_token() {
        let (service, jwt) = service().await;

        let response = service.login(&login("olena", "correct horse")).await.unwrap();

        assert_eq!(response.message, "You are now logged in as olena.");
        assert_eq!(
            jwt.verify_token(&response.data.access_token, ACCESS_TOKEN).unwrap(),
            5
        );
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_the_same() {
        let (service, _) = service().await;

        let wrong = service.login(&login("olena", "nope")).await;
        let unknown = service.login(&login("taras", "correct horse")).await;

        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)), "got {wrong:?}");
        assert!(matches!(unknown, Err(ServiceError::InvalidCredentials)), "got {unknown:?}");
    }
}
