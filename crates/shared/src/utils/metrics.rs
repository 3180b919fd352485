use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

/// Creates a service's own counter and histogram, registered as `{prefix}_request_*`.
pub async fn register_service_metrics(
    registry: &Arc<Mutex<Registry>>,
    prefix: &str,
    service_name: &str,
) -> Arc<Mutex<Metrics>> {
    let metrics = Metrics::new();
    let mut registry = registry.lock().await;

    registry.register(
        format!("{prefix}_request_counter"),
        format!("Total number of requests to the {service_name}"),
        metrics.request_counter.clone(),
    );
    registry.register(
        format!("{prefix}_request_duration"),
        format!("Histogram of request durations for the {service_name}"),
        metrics.request_duration.clone(),
    );

    Arc::new(Mutex::new(metrics))
}

/// Timing handle for one service operation.
pub struct OperationContext {
    pub operation: &'static str,
    pub method: Method,
    pub start_time: Instant,
}

impl OperationContext {
    pub fn start(operation: &'static str, method: Method) -> Self {
        info!("Starting operation: {operation}");
        Self {
            operation,
            method,
            start_time: Instant::now(),
        }
    }

    pub async fn success(self, metrics: &Mutex<Metrics>, message: &str) {
        self.complete(metrics, true, message).await;
    }

    pub async fn failure(self, metrics: &Mutex<Metrics>, message: &str) {
        self.complete(metrics, false, message).await;
    }

    async fn complete(self, metrics: &Mutex<Metrics>, is_success: bool, message: &str) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let status = if is_success {
            info!("✅ {} completed in {elapsed:.3}s: {message}", self.operation);
            Status::Success
        } else {
            error!("❌ {} failed after {elapsed:.3}s: {message}", self.operation);
            Status::Error
        };

        metrics.lock().await.record(self.method, status, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[tokio::test]
    async fn completed_operations_show_up_in_the_registry() {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let metrics = register_service_metrics(&registry, "cart_service", "CartService").await;

        OperationContext::start("AddToCart", Method::Post)
            .success(&metrics, "added")
            .await;
        OperationContext::start("AddToCart", Method::Post)
            .failure(&metrics, "missing product")
            .await;

        let mut body = String::new();
        encode(&mut body, &*registry.lock().await).unwrap();

        assert!(body.contains("cart_service_request_counter_total"));
        assert!(body.contains(r#"method="Post",status="Success""#));
        assert!(body.contains(r#"method="Post",status="Error""#));
    }
}
