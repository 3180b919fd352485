use super::issue_token;
use crate::{
    abstract_trait::{
        DynHashing, DynJwtService, DynUserCommandRepository, DynUserQueryRepository,
        RegisterServiceTrait,
    },
    domain::{
        requests::{CreateUserRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse},
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use validator::Validate;

pub struct RegisterServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub query: DynUserQueryRepository,
    pub command: DynUserCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct RegisterService {
    hash: DynHashing,
    jwt: DynJwtService,
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl RegisterService {
    pub async fn new(deps: RegisterServiceDeps) -> Self {
        let RegisterServiceDeps {
            hash,
            jwt,
            query,
            command,
            registry,
        } = deps;

        let metrics =
            register_service_metrics(&registry, "register_service", "RegisterService").await;

        Self {
            hash,
            jwt,
            query,
            command,
            metrics,
        }
    }

    async fn create_account(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        req.validate()?;

        let username = req.username.trim();
        let email = req.email.trim();

        if self.query.find_by_username(username).await?.is_some() {
            return Err(ServiceError::Conflict(
                "A user with that username already exists.".to_string(),
            ));
        }

        if self.query.find_by_email(email).await?.is_some() {
            return Err(ServiceError::Conflict(
                "A user with that email already exists.".to_string(),
            ));
        }

        let password = self.hash.hash_password(&req.password).await?;

        let (user, customer) = self
            .command
            .create_user_with_customer(&CreateUserRequest {
                username: username.to_string(),
                email: email.to_string(),
                first_name: req.first_name.trim().to_string(),
                last_name: req.last_name.trim().to_string(),
                password,
            })
            .await
            .map_err(|err| match err {
                RepositoryError::AlreadyExists(_) => ServiceError::Conflict(
                    "A user with that username or email already exists.".to_string(),
                ),
                other => ServiceError::Repo(other),
            })?;

        info!(
            "👤 Registered user ID {} with customer ID {}",
            user.user_id, customer.customer_id
        );

        issue_token(&self.jwt, user, "Registration successful.")
    }
}

#[async_trait]
impl RegisterServiceTrait for RegisterService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        info!("📝 Registering user: {}", req.username);
        let ctx = OperationContext::start("Register", Method::Post);

        let result = self.create_account(req).await;
        match &result {
            Ok(_) => ctx.success(&self.metrics, "Registration successful").await,
            Err(err) => ctx.failure(&self.metrics, &err.to_string()).await,
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{CustomerRepositoryTrait, UserQueryRepositoryTrait},
        config::{Hashing, JwtConfig},
        test_support::{InMemoryUsers, registry, user},
    };

    async fn service(users: Arc<InMemoryUsers>) -> RegisterService {
        RegisterService::new(RegisterServiceDeps {
            hash: Arc::new(Hashing::with_cost(4)),
            jwt: Arc::new(JwtConfig::new("test-secret")),
            query: users.clone(),
            command: users,
            registry: registry(),
        })
        .await
    }

    fn request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: email.into(),
            first_name: "Olena".into(),
            last_name: String::new(),
            password: "long-enough".into(),
            confirm_password: "long-enough".into(),
        }
    }

    #[tokio::test]
    async fn registration_creates_user_customer_and_token() {
        let users = InMemoryUsers::with(Vec::new());
        let service = service(users.clone()).await;

        let response = service
            .register(&request("olena", "olena@example.com"))
            .await
            .unwrap();

        assert!(!response.data.access_token.is_empty());
        assert_eq!(response.data.user.username, "olena");

        let user_id = response.data.user.id;
        assert!(users.find_by_user_id(user_id).await.unwrap().is_some());
        assert_ne!(users.password_of(user_id).unwrap(), "long-enough");
    }

    #[tokio::test]
    async fn duplicate_username_or_email_conflicts() {
        let users = InMemoryUsers::with(vec![user(1, "olena", "olena@example.com", "x")]);
        let service = service(users).await;

        let same_name = service.register(&request("olena", "other@example.com")).await;
        let same_email = service.register(&request("taras", "olena@example.com")).await;

        assert!(matches!(same_name, Err(ServiceError::Conflict(_))), "got {same_name:?}");
        assert!(matches!(same_email, Err(ServiceError::Conflict(_))), "got {same_email:?}");
    }

    #[tokio::test]
    async fn failed_customer_insert_leaves_no_user_behind() {
        let users = InMemoryUsers::with(Vec::new());
        users.fail_customer_inserts();
        let service = service(users.clone()).await;

        let result = service.register(&request("olena", "olena@example.com")).await;

        assert!(matches!(result, Err(ServiceError::Repo(_))), "got {result:?}");
        assert!(users.find_by_username("olena").await.unwrap().is_none());
        assert!(users.customers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatched_passwords_fail_validation() {
        let service = service(InMemoryUsers::with(Vec::new())).await;
        let mut req = request("olena", "olena@example.com");
        req.confirm_password = "different-one".into();

        let result = service.register(&req).await;

        assert!(matches!(result, Err(ServiceError::Validation(_))), "got {result:?}");
    }
}
