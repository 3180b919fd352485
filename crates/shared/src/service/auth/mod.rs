mod identity;
mod login;
mod password_reset;
mod register;

pub use self::identity::IdentityService;
pub use self::login::{LoginService, LoginServiceDeps};
pub use self::password_reset::{PasswordResetService, PasswordResetServiceDeps};
pub use self::register::{RegisterService, RegisterServiceDeps};

use crate::{
    abstract_trait::{
        DynEmailService, DynHashing, DynIdentityService, DynJwtService,
        DynLoginService, DynPasswordResetService, DynRegisterService,
        DynResetTokenCommandRepository, DynResetTokenQueryRepository, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    config::SiteConfig,
    domain::responses::{ApiResponse, TokenResponse, UserResponse},
    errors::ServiceError,
    model::User,
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AuthService {
    pub login: DynLoginService,
    pub register: DynRegisterService,
    pub identity: DynIdentityService,
    pub password_reset: DynPasswordResetService,
}

pub struct AuthServiceDeps {
    pub hash: DynHashing,
    pub jwt: DynJwtService,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub reset_token_query: DynResetTokenQueryRepository,
    pub reset_token_command: DynResetTokenCommandRepository,
    pub mailer: DynEmailService,
    pub site: SiteConfig,
    pub registry: Arc<Mutex<Registry>>,
}

impl AuthService {
    pub async fn new(deps: AuthServiceDeps) -> Self {
        let AuthServiceDeps {
            hash,
            jwt,
            user_query,
            user_command,
            reset_token_query,
            reset_token_command,
            mailer,
            site,
            registry,
        } = deps;

        let login = Arc::new(
            LoginService::new(LoginServiceDeps {
                hash: hash.clone(),
                jwt: jwt.clone(),
                query: user_query.clone(),
                registry: registry.clone(),
            })
            .await,
        ) as DynLoginService;

        let register = Arc::new(
            RegisterService::new(RegisterServiceDeps {
                hash: hash.clone(),
                jwt,
                query: user_query.clone(),
                command: user_command.clone(),
                registry: registry.clone(),
            })
            .await,
        ) as DynRegisterService;

        let identity = Arc::new(IdentityService::new(user_query.clone(), registry.clone()).await)
            as DynIdentityService;

        let password_reset = Arc::new(
            PasswordResetService::new(PasswordResetServiceDeps {
                hash,
                user_query,
                user_command,
                reset_token_query,
                reset_token_command,
                mailer,
                site,
                registry,
            })
            .await,
        ) as DynPasswordResetService;

        Self {
            login,
            register,
            identity,
            password_reset,
        }
    }
}

fn issue_token(
    jwt: &DynJwtService,
    user: User,
    message: &str,
) -> Result<ApiResponse<TokenResponse>, ServiceError> {
    let access_token = jwt.generate_token(i64::from(user.user_id), crate::config::ACCESS_TOKEN)?;

    Ok(ApiResponse::success(
        message,
        TokenResponse {
            access_token,
            user: UserResponse::from(user),
        },
    ))
}
