use crate::{
    abstract_trait::{
        DynEmailService, DynHashing, DynResetTokenCommandRepository, DynResetTokenQueryRepository,
        DynUserCommandRepository, DynUserQueryRepository, EmailRequest, PasswordResetServiceTrait,
    },
    config::SiteConfig,
    domain::{
        requests::{ConfirmPasswordResetRequest, CreateResetTokenRequest, ForgotPasswordRequest},
        responses::ApiResponse,
    },
    errors::ServiceError,
    utils::{
        EmailTemplateData, Method, Metrics, OperationContext, generate_random_string,
        register_service_metrics,
    },
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

const RESET_TOKEN_LENGTH: usize = 48;
const RESET_TOKEN_TTL_HOURS: i64 = 24;

pub struct PasswordResetServiceDeps {
    pub hash: DynHashing,
    pub user_query: DynUserQueryRepository,
    pub user_command: DynUserCommandRepository,
    pub reset_token_query: DynResetTokenQueryRepository,
    pub reset_token_command: DynResetTokenCommandRepository,
    pub mailer: DynEmailService,
    pub site: SiteConfig,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct PasswordResetService {
    hash: DynHashing,
    user_query: DynUserQueryRepository,
    user_command: DynUserCommandRepository,
    reset_token_query: DynResetTokenQueryRepository,
    reset_token_command: DynResetTokenCommandRepository,
    mailer: DynEmailService,
    site: SiteConfig,
    metrics: Arc<Mutex<Metrics>>,
}

impl PasswordResetService {
    pub async fn new(deps: PasswordResetServiceDeps) -> Self {
        let PasswordResetServiceDeps {
            hash,
            user_query,
            user_command,
            reset_token_query,
            reset_token_command,
            mailer,
            site,
            registry,
        } = deps;

        let metrics =
            register_service_metrics(&registry, "password_reset_service", "PasswordResetService")
                .await;

        Self {
            hash,
            user_query,
            user_command,
            reset_token_query,
            reset_token_command,
            mailer,
            site,
            metrics,
        }
    }

    async fn request_reset(&self, req: &ForgotPasswordRequest) -> Result<(), ServiceError> {
        let invalid_email =
            || ServiceError::BadRequest("An invalid email has been entered.".to_string());

        if req.validate().is_err() {
            return Err(invalid_email());
        }

        let Some(user) = self.user_query.find_by_email(req.email.trim()).await? else {
            warn!("❌ Password reset requested for unknown email");
            return Err(invalid_email());
        };

        let token = generate_random_string(RESET_TOKEN_LENGTH)
            .map_err(|e| ServiceError::Internal(format!("Failed to generate reset token: {e}")))?;

        self.reset_token_command
            .create_reset_token(&CreateResetTokenRequest {
                user_id: user.user_id,
                token: token.clone(),
                expired_date: (Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS)).naive_utc(),
            })
            .await?;

        let email = EmailRequest {
            to: user.email.clone(),
            subject: "Password Reset Requested".to_string(),
            data: EmailTemplateData {
                site_name: self.site.name.clone(),
                title: "Password Reset Requested".to_string(),
                greeting: format!("Hello {},", user.username),
                message: format!(
                    "We received a request to reset the password for your account at {}. \
                     The link below stays valid for {RESET_TOKEN_TTL_HOURS} hours.",
                    self.site.domain
                ),
                button: "Reset password".to_string(),
                link: self.site.link(&format!("/reset-password?token={token}")),
            },
        };

        self.mailer.send(&email).await?;
        info!("📧 Password reset mail sent for user ID {}", user.user_id);

        Ok(())
    }

    async fn confirm_reset(&self, req: &ConfirmPasswordResetRequest) -> Result<(), ServiceError> {
        req.validate()?;

        let token = self
            .reset_token_query
            .find_by_token(&req.token)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Reset token not found".to_string()))?;

        if token.expired_date <= Utc::now().naive_utc() {
            self.reset_token_command
                .delete_reset_token(token.user_id)
                .await?;
            return Err(ServiceError::BadRequest(
                "This password reset link has expired.".to_string(),
            ));
        }

        let hashed = self.hash.hash_password(&req.password).await?;
        self.user_command
            .update_password(token.user_id, &hashed)
            .await?;
        self.reset_token_command
            .delete_reset_token(token.user_id)
            .await?;

        info!("🔑 Password reset completed for user ID {}", token.user_id);
        Ok(())
    }
}

#[async_trait]
impl PasswordResetServiceTrait for PasswordResetService {
    async fn forgot(
        &self,
        req: &ForgotPasswordRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        let ctx = OperationContext::start("ForgotPassword", Method::Post);

        match self.request_reset(req).await {
            Ok(()) => {
                ctx.success(&self.metrics, "Reset mail sent").await;
                Ok(ApiResponse::success(
                    "A message with reset password instructions has been sent to your inbox.",
                    true,
                ))
            }
            Err(err) => {
                ctx.failure(&self.metrics, &err.to_string()).await;
                Err(err)
            }
        }
    }

    async fn reset_password(
        &self,
        req: &ConfirmPasswordResetRequest,
    ) -> Result<ApiResponse<bool>, ServiceError> {
        let ctx = OperationContext::start("ResetPassword", Method::Post);

        match self.confirm_reset(req).await {
            Ok(()) => {
                ctx.success(&self.metrics, "Password reset").await;
                Ok(ApiResponse::success(
                    "Your password has been set. You may go ahead and log in now.",
                    true,
                ))
            }
            Err(err) => {
                ctx.failure(&self.metrics, &err.to_string()).await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::HashingTrait,
        config::Hashing,
        model::ResetToken,
        test_support::{InMemoryResetTokens, InMemoryUsers, RecordingMailer, registry, user},
    };

    struct Fixture {
        service: PasswordResetService,
        users: Arc<InMemoryUsers>,
        tokens: Arc<InMemoryResetTokens>,
        mailer: Arc<RecordingMailer>,
    }

    async fn fixture(mailer: RecordingMailer) -> Fixture {
        let users = InMemoryUsers::with(vec![user(3, "olena", "olena@example.com", "old-hash")]);
        let tokens = Arc::new(InMemoryResetTokens::default());
        let mailer = Arc::new(mailer);

        let service = PasswordResetService::new(PasswordResetServiceDeps {
            hash: Arc::new(Hashing::with_cost(4)),
            user_query: users.clone(),
            user_command: users.clone(),
            reset_token_query: tokens.clone(),
            reset_token_command: tokens.clone(),
            mailer: mailer.clone(),
            site: SiteConfig {
                domain: "127.0.0.1:8000".into(),
                protocol: "http".into(),
                name: "Website".into(),
            },
            registry: registry(),
        })
        .await;

        Fixture {
            service,
            users,
            tokens,
            mailer,
        }
    }

    fn forgot(email: &str) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_without_mail() {
        let f = fixture(RecordingMailer::default()).await;

        match f.service.forgot(&forgot("ghost@example.com")).await {
            Err(ServiceError::BadRequest(msg)) => {
                assert_eq!(msg, "An invalid email has been entered.")
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
        assert!(f.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn known_email_gets_a_reset_link() {
        let f = fixture(RecordingMailer::default()).await;

        f.service.forgot(&forgot("olena@example.com")).await.unwrap();

        let token = f.tokens.tokens.lock().unwrap()[0].clone();
        let sent = f.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "olena@example.com");
        assert_eq!(
            sent[0].data.link,
            format!("http://127.0.0.1:8000/reset-password?token={}", token.token)
        );
        assert!(token.expired_date > Utc::now().naive_utc() + Duration::hours(23));
    }

    #[tokio::test]
    async fn mail_failure_surfaces_as_email_error() {
        let f = fixture(RecordingMailer {
            fail: true,
            ..RecordingMailer::default()
        })
        .await;

        let result = f.service.forgot(&forgot("olena@example.com")).await;

        assert!(matches!(result, Err(ServiceError::Email(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn confirm_sets_new_password_and_consumes_token() {
        let f = fixture(RecordingMailer::default()).await;
        f.service.forgot(&forgot("olena@example.com")).await.unwrap();
        let token = f.tokens.tokens.lock().unwrap()[0].token.clone();

        f.service
            .reset_password(&ConfirmPasswordResetRequest {
                token: token.clone(),
                password: "brand-new-secret".into(),
                confirm_password: "brand-new-secret".into(),
            })
            .await
            .unwrap();

        let hash = f.users.password_of(3).unwrap();
        assert!(
            Hashing::with_cost(4)
                .compare_password(&hash, "brand-new-secret")
                .await
                .is_ok()
        );
        assert!(f.tokens.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn expired_and_unknown_tokens_are_refused() {
        let f = fixture(RecordingMailer::default()).await;
        f.tokens.tokens.lock().unwrap().push(ResetToken {
            reset_token_id: 1,
            user_id: 3,
            token: "stale".into(),
            expired_date: (Utc::now() - Duration::hours(1)).naive_utc(),
        });

        let confirm = |token: &str| ConfirmPasswordResetRequest {
            token: token.into(),
            password: "brand-new-secret".into(),
            confirm_password: "brand-new-secret".into(),
        };

        let expired = f.service.reset_password(&confirm("stale")).await;
        assert!(matches!(expired, Err(ServiceError::BadRequest(_))), "got {expired:?}");

        let unknown = f.service.reset_password(&confirm("missing")).await;
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))), "got {unknown:?}");
        assert_eq!(f.users.password_of(3).unwrap(), "old-hash");
    }
}
