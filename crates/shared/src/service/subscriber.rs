use crate::{
    abstract_trait::{DynSubscriberRepository, DynUserQueryRepository, SubscriberServiceTrait},
    domain::{
        requests::SubscribeRequest,
        responses::{ApiResponse, SubscriberResponse},
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use validator::ValidateEmail;

pub struct SubscriberServiceDeps {
    pub subscribers: DynSubscriberRepository,
    pub users: DynUserQueryRepository,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct SubscriberService {
    subscribers: DynSubscriberRepository,
    users: DynUserQueryRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl SubscriberService {
    pub async fn new(deps: SubscriberServiceDeps) -> Self {
        let SubscriberServiceDeps {
            subscribers,
            users,
            registry,
        } = deps;

        let metrics =
            register_service_metrics(&registry, "subscriber_service", "SubscriberService").await;

        Self {
            subscribers,
            users,
            metrics,
        }
    }

    async fn do_subscribe(
        &self,
        req: &SubscribeRequest,
    ) -> Result<ApiResponse<SubscriberResponse>, ServiceError> {
        let filled = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let (Some(name), Some(email)) = (filled(&req.name), filled(&req.email)) else {
            return Err(ServiceError::BadRequest(
                "You must type legit name and email to subscribe to a Newsletter".to_string(),
            ));
        };

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Found registered user with associated {email} email. You must login to subscribe or unsubscribe."
            )));
        }

        if self.subscribers.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "{email} email address is already subscriber."
            )));
        }

        if !email.validate_email() {
            return Err(ServiceError::BadRequest(
                "Enter a valid email address.".to_string(),
            ));
        }

        let subscriber = self.subscribers.create(&name, &email).await?;
        info!("📰 New newsletter subscriber ID {}", subscriber.subscriber_id);

        Ok(ApiResponse::success(
            &format!("{email} email was successfully subscribed to our newsletter!"),
            SubscriberResponse::from(subscriber),
        ))
    }
}

#[async_trait]
impl SubscriberServiceTrait for SubscriberService {
    async fn subscribe(
        &self,
        req: &SubscribeRequest,
    ) -> Result<ApiResponse<SubscriberResponse>, ServiceError> {
        let ctx = OperationContext::start("Subscribe", Method::Post);

        let result = self.do_subscribe(req).await;
        match &result {
            Ok(_) => ctx.success(&self.metrics, "Subscribed").await,
            Err(err) => ctx.failure(&self.metrics, &err.to_string()).await,
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemorySubscribers, InMemoryUsers, registry, user};

    async fn service() -> (SubscriberService, Arc<InMemorySubscribers>) {
        let subscribers = Arc::new(InMemorySubscribers::default());
        let service = SubscriberService::new(SubscriberServiceDeps {
            subscribers: subscribers.clone(),
            users: InMemoryUsers::with(vec![user(1, "olena", "olena@example.com", "x")]),
            registry: registry(),
        })
        .await;
        (service, subscribers)
    }

    fn request(name: &str, email: &str) -> SubscribeRequest {
        SubscribeRequest {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    fn message(result: Result<ApiResponse<SubscriberResponse>, ServiceError>) -> String {
        match result {
            Err(ServiceError::BadRequest(msg)) | Err(ServiceError::Conflict(msg)) => msg,
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_first() {
        let (service, _) = service().await;

        assert_eq!(
            message(service.subscribe(&request("  ", "olena@example.com")).await),
            "You must type legit name and email to subscribe to a Newsletter"
        );
        assert_eq!(
            message(service.subscribe(&SubscribeRequest::default()).await),
            "You must type legit name and email to subscribe to a Newsletter"
        );
    }

    #[tokio::test]
    async fn registered_email_must_log_in() {
        let (service, _) = service().await;

        assert_eq!(
            message(service.subscribe(&request("Olena", "olena@example.com")).await),
            "Found registered user with associated olena@example.com email. You must login to subscribe or unsubscribe."
        );
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_after_lookups() {
        let (service, subscribers) = service().await;

        assert_eq!(
            message(service.subscribe(&request("Taras", "not-an-email")).await),
            "Enter a valid email address."
        );
        assert!(subscribers.subscribers.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn subscribes_once() {
        let (service, _) = service().await;

        let ok = service
            .subscribe(&request("Taras", "taras@example.com"))
            .await
            .unwrap();
        assert_eq!(
            ok.message,
            "taras@example.com email was successfully subscribed to our newsletter!"
        );

        assert_eq!(
            message(service.subscribe(&request("Taras", "taras@example.com")).await),
            "taras@example.com email address is already subscriber."
        );
    }
}
