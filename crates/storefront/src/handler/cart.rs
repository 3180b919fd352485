use crate::{
    middleware::{
        AuthUser, LenientJson, SessionContext, SessionManager, optional_auth_middleware,
        session_middleware,
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use shared::{
    abstract_trait::{DynCartService, DynJwtService},
    domain::{
        requests::{AddToCartRequest, AddressRequest, ApplyPromoCodeRequest, RemoveFromCartRequest},
        responses::{ApiResponse, CartResponse, CheckoutResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    responses(
        (status = 200, description = "Priced cart for the current session", body = ApiResponse<CartResponse>)
    )
)]
pub async fn view_cart(
    Extension(service): Extension<DynCartService>,
    Extension(session): Extension<SessionContext>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.view_cart(&session.data).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/{product_id}",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body(content = AddToCartRequest, description = "Quantity to add, 1 when omitted"),
    responses(
        (status = 200, description = "Product added", body = ApiResponse<CartResponse>),
        (status = 404, description = "Product not found or unavailable")
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartService>,
    Extension(manager): Extension<SessionManager>,
    Extension(session): Extension<SessionContext>,
    Path(product_id): Path<i32>,
    LenientJson(body): LenientJson<AddToCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (updated, response) = service
        .add_to_cart(session.data, product_id, body.quantity)
        .await?;
    manager.save(&session.id, &updated).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/{product_id}/remove",
    tag = "Cart",
    params(("product_id" = i32, Path, description = "Product ID")),
    request_body(content = RemoveFromCartRequest, description = "Quantity to remove, 1 when omitted"),
    responses(
        (status = 200, description = "Cart updated", body = ApiResponse<CartResponse>)
    )
)]
pub async fn remove_from_cart(
    Extension(service): Extension<DynCartService>,
    Extension(manager): Extension<SessionManager>,
    Extension(session): Extension<SessionContext>,
    Path(product_id): Path<i32>,
    LenientJson(body): LenientJson<RemoveFromCartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (updated, response) = service
        .remove_from_cart(session.data, product_id, body.remove_quantity)
        .await?;
    manager.save(&session.id, &updated).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/promo-code",
    tag = "Cart",
    request_body = ApplyPromoCodeRequest,
    responses(
        (status = 200, description = "Promo code stored in the session", body = ApiResponse<CartResponse>),
        (status = 400, description = "Blank, expired or used-up promo code"),
        (status = 404, description = "Promo code not found")
    )
)]
pub async fn apply_promo_code(
    Extension(service): Extension<DynCartService>,
    Extension(manager): Extension<SessionManager>,
    Extension(session): Extension<SessionContext>,
    LenientJson(body): LenientJson<ApplyPromoCodeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (updated, response) = service
        .apply_promo_code(session.data, &body.promo_code)
        .await?;
    manager.save(&session.id, &updated).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Cart",
    request_body = AddressRequest,
    responses(
        (status = 201, description = "Orders created, cart cleared", body = ApiResponse<CheckoutResponse>),
        (status = 400, description = "Invalid address or empty cart")
    )
)]
pub async fn checkout(
    Extension(service): Extension<DynCartService>,
    Extension(manager): Extension<SessionManager>,
    Extension(session): Extension<SessionContext>,
    Extension(user): Extension<Option<AuthUser>>,
    LenientJson(body): LenientJson<AddressRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let (updated, response) = service
        .checkout(session.data, &body, user.map(|AuthUser(id)| id))
        .await?;
    // Orders are committed at this point; the response is 201 regardless.
    manager.save_or_flush(&session.id, &updated).await;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/order-success",
    tag = "Cart",
    responses(
        (status = 200, description = "Order confirmation", body = serde_json::Value)
    )
)]
pub async fn order_success() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Thank you for your order!"
    }))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    cart_router(
        app_state.di_container.cart_service.clone(),
        app_state.session.clone(),
        app_state.jwt_config.clone(),
    )
}

fn cart_router(
    service: DynCartService,
    session: SessionManager,
    jwt: DynJwtService,
) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/cart", get(view_cart))
        .route("/api/cart/promo-code", post(apply_promo_code))
        .route("/api/cart/{product_id}", post(add_to_cart))
        .route("/api/cart/{product_id}/remove", post(remove_from_cart))
        .route("/api/checkout", post(checkout))
        .route_layer(middleware::from_fn(optional_auth_middleware))
        .route_layer(middleware::from_fn(session_middleware))
        .route("/api/order-success", get(order_success))
        .layer(Extension(service))
        .layer(Extension(session))
        .layer(Extension(jwt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, Response, header},
    };
    use serde_json::Value;
    use shared::{
        config::JwtConfig,
        model::PromoCode,
        service::{CartService, CartServiceDeps},
        test_support::{
            InMemoryOrders, InMemoryProducts, InMemoryPromoCodes, InMemorySessionStore,
            InMemoryUsers, product, registry,
        },
    };
    use tower::ServiceExt;

    struct Fixture {
        router: Router,
        store: Arc<InMemorySessionStore>,
        orders: Arc<InMemoryOrders>,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(InMemorySessionStore::default());
        let orders = Arc::new(InMemoryOrders::default());

        let service = CartService::new(CartServiceDeps {
            products: InMemoryProducts::with(vec![
                product(1, "Linen Shirt", 10),
                product(2, "Wool Socks", 5),
            ]),
            promo_codes: InMemoryPromoCodes::with(vec![PromoCode {
                promo_code_id: 1,
                promo_code: "SPRING5".to_string(),
                discount: 5,
                expires_at: None,
                usage_limit: None,
                used_count: 0,
            }]),
            customers: InMemoryUsers::with(Vec::new()),
            orders: orders.clone(),
            registry: registry(),
        })
        .await;

        let (router, _) = cart_router(
            Arc::new(service),
            SessionManager::new(store.clone(), chrono::Duration::minutes(5)),
            Arc::new(JwtConfig::new("test-secret")),
        )
        .split_for_parts();

        Fixture {
            router,
            store,
            orders,
        }
    }

    fn post(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn session_cookie(response: &Response<Body>) -> String {
        response.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    fn session_id(cookie: &str) -> &str {
        cookie.trim_start_matches("sessionid=")
    }

    async fn json_body(response: Response<Body>) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn added_quantities_persist_across_requests() {
        let f = fixture().await;

        let first = f
            .router
            .clone()
            .oneshot(post("/api/cart/1", None, r#"{"quantity":"2"}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let cookie = session_cookie(&first);

        let second = f
            .router
            .clone()
            .oneshot(post("/api/cart/1", Some(&cookie), ""))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let view = f
            .router
            .clone()
            .oneshot(
                Request::get("/api/cart")
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(view).await;

        assert_eq!(body["data"]["items"][0]["quantity"], 3);
        assert_eq!(body["data"]["total"], 30);
        let stored = f.store.session(session_id(&cookie)).unwrap();
        assert_eq!(stored.quantity_of(1), Some(3));
    }

    #[tokio::test]
    async fn promo_code_route_is_not_taken_for_a_product_id() {
        let f = fixture().await;

        let response = f
            .router
            .clone()
            .oneshot(post("/api/cart/promo-code", None, r#"{"promo_code":"SPRING5"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        let stored = f.store.session(session_id(&cookie)).unwrap();
        assert_eq!(stored.promo_code.as_deref(), Some("SPRING5"));
    }

    #[tokio::test]
    async fn checkout_is_created_and_leaves_an_empty_session() {
        let f = fixture().await;
        let added = f
            .router
            .clone()
            .oneshot(post("/api/cart/2", None, r#"{"quantity":3}"#))
            .await
            .unwrap();
        let cookie = session_cookie(&added);
        f.router
            .clone()
            .oneshot(post("/api/cart/promo-code", Some(&cookie), r#"{"promo_code":"SPRING5"}"#))
            .await
            .unwrap();

        let response = f
            .router
            .clone()
            .oneshot(post("/api/checkout", Some(&cookie), &address_json()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["data"]["redirect_to"], "/order-success");
        assert_eq!(body["data"]["address"]["total_price"], 10);

        let stored = f.store.session(session_id(&cookie)).unwrap();
        assert!(stored.is_cart_empty());
        assert!(stored.promo_code.is_none());
        assert_eq!(f.orders.checkouts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn checkout_still_succeeds_when_session_cannot_be_saved() {
        let f = fixture().await;
        let added = f
            .router
            .clone()
            .oneshot(post("/api/cart/1", None, ""))
            .await
            .unwrap();
        let cookie = session_cookie(&added);
        f.store.fail_saves();

        let response = f
            .router
            .clone()
            .oneshot(post("/api/checkout", Some(&cookie), &address_json()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(f.store.session(session_id(&cookie)).is_none());
        assert_eq!(f.orders.checkouts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_cart_checkout_is_rejected() {
        let f = fixture().await;

        let response = f
            .router
            .clone()
            .oneshot(post("/api/checkout", None, &address_json()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(f.orders.checkouts.lock().unwrap().is_empty());
    }

    fn address_json() -> String {
        serde_json::json!({
            "first_name": "Olena",
            "last_name": "Koval",
            "email": "olena@example.com",
            "city": "Lviv",
            "house": "12",
            "apartment": "4"
        })
        .to_string()
    }
}
