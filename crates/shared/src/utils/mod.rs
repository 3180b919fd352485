mod lenient;
mod logs;
mod metrics;
mod otel;
mod random_string;
mod shutdown;
mod slug;
mod template;

pub use self::lenient::deserialize_quantity;
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, OperationContext, Status, register_service_metrics};
pub use self::otel::Telemetry;
pub use self::random_string::generate_random_string;
pub use self::shutdown::shutdown_signal;
pub use self::slug::slugify;
pub use self::template::{EmailTemplate, EmailTemplateData, render_email};
