mod auth;
mod cart;
mod catalog;
mod product;
mod subscriber;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Json},
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::utils::shutdown_signal;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::info;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_axum::router::OpenApiRouter;

pub use self::auth::auth_routes;
pub use self::cart::cart_routes;
pub use self::catalog::catalog_routes;
pub use self::product::product_routes;
pub use self::subscriber::subscriber_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_user_handler,
        auth::register_user_handler,
        auth::logout_handler,
        auth::get_me_handler,
        auth::forgot_password_handler,
        auth::reset_password_handler,

        catalog::get_categories,
        catalog::get_products,
        catalog::get_category_products,
        catalog::get_product_detail,

        product::create_product,
        product::update_product,
        product::delete_product,

        subscriber::subscribe,

        cart::view_cart,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::apply_promo_code,
        cart::checkout,
        cart::order_success,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Accounts and password reset"),
        (name = "Catalog", description = "Categories, product listing and search"),
        (name = "Product", description = "Staff product management"),
        (name = "Newsletter", description = "Newsletter subscription"),
        (name = "Cart", description = "Session cart, promo codes and checkout"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to encode metrics: {e}"),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    )
        .into_response()
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState) -> axum::Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(catalog_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(subscriber_routes(shared_state.clone()))
            .merge(cart_routes(shared_state));

        let (app_router, api) = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
            .layer(TraceLayer::new_for_http())
            .split_for_parts();

        app_router.route(
            "/api-docs/openapi.json",
            get(move || async move { Json(api) }),
        )
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(app_state);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 OpenAPI document: http://localhost:{port}/api-docs/openapi.json");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        Ok(())
    }
}
