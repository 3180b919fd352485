use crate::{
    abstract_trait::{
        CartServiceTrait, DynCustomerRepository, DynOrderCommandRepository,
        DynProductQueryRepository, DynPromoCodeQueryRepository,
    },
    domain::{
        requests::{AddressRequest, CreateCheckoutRequest, NewOrderLine},
        responses::{
            AddressResponse, ApiResponse, CartLineResponse, CartResponse, CheckoutResponse,
            OrderResponse,
        },
        session::StorefrontSession,
    },
    errors::ServiceError,
    utils::{Method, Metrics, OperationContext, register_service_metrics},
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};
use validator::Validate;

pub const ORDER_SUCCESS_PATH: &str = "/order-success";

pub struct CartServiceDeps {
    pub products: DynProductQueryRepository,
    pub promo_codes: DynPromoCodeQueryRepository,
    pub customers: DynCustomerRepository,
    pub orders: DynOrderCommandRepository,
    pub registry: Arc<Mutex<Registry>>,
}

pub struct CartService {
    products: DynProductQueryRepository,
    promo_codes: DynPromoCodeQueryRepository,
    customers: DynCustomerRepository,
    orders: DynOrderCommandRepository,
    metrics: Arc<Mutex<Metrics>>,
}

impl CartService {
    pub async fn new(deps: CartServiceDeps) -> Self {
        let CartServiceDeps {
            products,
            promo_codes,
            customers,
            orders,
            registry,
        } = deps;

        let metrics = register_service_metrics(&registry, "cart_service", "CartService").await;

        Self {
            products,
            promo_codes,
            customers,
            orders,
            metrics,
        }
    }

    /// Discount of the session's promo code, or 0 when it is unknown,
    /// expired or used up.
    async fn active_discount(&self, code: Option<&str>) -> Result<i64, ServiceError> {
        let Some(code) = code else {
            return Ok(0);
        };

        let discount = self
            .promo_codes
            .find_by_code(code)
            .await?
            .and_then(|promo| promo.active_discount(Utc::now().naive_utc()));

        if discount.is_none() {
            warn!("🏷️ Promo code {code} in session is not applicable, ignoring");
        }

        Ok(discount.unwrap_or(0))
    }

    /// Prices the session's cart. Cart keys without a matching product are skipped.
    pub async fn compute_cart_view(
        &self,
        session: &StorefrontSession,
    ) -> Result<CartResponse, ServiceError> {
        if session.is_cart_empty() {
            return Ok(CartResponse {
                promo_code: session.promo_code.clone(),
                ..CartResponse::default()
            });
        }

        let products = self.products.find_by_ids(&session.product_ids()).await?;

        let items: Vec<CartLineResponse> = products
            .into_iter()
            .filter_map(|product| {
                let quantity = session.quantity_of(product.product_id)?;
                Some(CartLineResponse {
                    line_total: product.price.saturating_mul(i64::from(quantity)),
                    product_id: product.product_id,
                    name: product.name,
                    slug: product.slug,
                    price: product.price,
                    quantity,
                })
            })
            .collect();

        let subtotal = items
            .iter()
            .fold(0_i64, |acc, item| acc.saturating_add(item.line_total));
        let discount = self.active_discount(session.promo_code.as_deref()).await?;

        Ok(CartResponse {
            items,
            subtotal,
            discount,
            promo_code: session.promo_code.clone(),
            total: subtotal.saturating_sub(discount),
        })
    }

    async fn run<T>(
        &self,
        ctx: OperationContext,
        result: Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        match &result {
            Ok(_) => ctx.success(&self.metrics, "ok").await,
            Err(err) => ctx.failure(&self.metrics, &err.to_string()).await,
        }
        result
    }

    async fn do_add(
        &self,
        session: StorefrontSession,
        product_id: i32,
        quantity: i32,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError> {
        let product = self
            .products
            .find_available_by_id(product_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Product not found".to_string()))?;

        let session = session.with_added(product.product_id, quantity);
        let cart = self.compute_cart_view(&session).await?;

        info!("🛒 Added {quantity} x product ID {product_id} to cart");

        Ok((
            session,
            ApiResponse::success(
                format!("{quantity} {} added to cart successfully!", product.name),
                cart,
            ),
        ))
    }

    async fn do_apply_promo(
        &self,
        session: StorefrontSession,
        code: &str,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ServiceError::BadRequest(
                "Please enter a promo code.".to_string(),
            ));
        }

        let promo = self
            .promo_codes
            .find_by_code(code)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Promo code not found.".to_string()))?;

        if promo.is_expired(Utc::now().naive_utc()) {
            return Err(ServiceError::BadRequest(
                "This promo code is no longer valid.".to_string(),
            ));
        }

        if !promo.is_valid() {
            return Err(ServiceError::BadRequest(
                "This promo code has reached its usage limit.".to_string(),
            ));
        }

        let session = session.with_promo_code(promo.promo_code);
        let cart = self.compute_cart_view(&session).await?;

        Ok((
            session,
            ApiResponse::success("Promo code applied successfully.", cart),
        ))
    }

    async fn do_checkout(
        &self,
        session: StorefrontSession,
        address: &AddressRequest,
        user_id: Option<i32>,
    ) -> Result<(StorefrontSession, ApiResponse<CheckoutResponse>), ServiceError> {
        address.validate()?;

        let cart = self.compute_cart_view(&session).await?;
        if cart.items.is_empty() {
            return Err(ServiceError::BadRequest("Your cart is empty.".to_string()));
        }

        let customer_id = match user_id {
            Some(user_id) => self
                .customers
                .find_by_user_id(user_id)
                .await?
                .map(|customer| customer.customer_id),
            None => None,
        };

        let request = CreateCheckoutRequest {
            customer_id,
            address: address.clone(),
            total_price: cart.total,
            lines: cart
                .items
                .iter()
                .map(|item| NewOrderLine {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    total_price: item.line_total,
                })
                .collect(),
        };

        let (address, orders) = self.orders.create_checkout(&request).await?;

        info!(
            "🧾 Checkout completed: address ID {} with {} orders, total {}",
            address.address_id,
            orders.len(),
            address.total_price
        );

        Ok((
            session.cleared(),
            ApiResponse::success(
                "Your order has been placed.",
                CheckoutResponse {
                    address: AddressResponse::from(address),
                    orders: orders.into_iter().map(OrderResponse::from).collect(),
                    redirect_to: ORDER_SUCCESS_PATH.to_string(),
                },
            ),
        ))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn view_cart(
        &self,
        session: &StorefrontSession,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let ctx = OperationContext::start("ViewCart", Method::Get);
        let result = self
            .compute_cart_view(session)
            .await
            .map(|cart| ApiResponse::success("Cart retrieved successfully", cart));
        self.run(ctx, result).await
    }

    async fn add_to_cart(
        &self,
        session: StorefrontSession,
        product_id: i32,
        quantity: i32,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError> {
        let ctx = OperationContext::start("AddToCart", Method::Post);
        let result = self.do_add(session, product_id, quantity).await;
        self.run(ctx, result).await
    }

    async fn remove_from_cart(
        &self,
        session: StorefrontSession,
        product_id: i32,
        remove_quantity: i32,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError> {
        let ctx = OperationContext::start("RemoveFromCart", Method::Post);
        let session = session.with_removed(product_id, remove_quantity);
        let result = self
            .compute_cart_view(&session)
            .await
            .map(|cart| (session, ApiResponse::success("Cart updated.", cart)));
        self.run(ctx, result).await
    }

    async fn apply_promo_code(
        &self,
        session: StorefrontSession,
        code: &str,
    ) -> Result<(StorefrontSession, ApiResponse<CartResponse>), ServiceError> {
        let ctx = OperationContext::start("ApplyPromoCode", Method::Post);
        let result = self.do_apply_promo(session, code).await;
        self.run(ctx, result).await
    }

    async fn checkout(
        &self,
        session: StorefrontSession,
        address: &AddressRequest,
        user_id: Option<i32>,
    ) -> Result<(StorefrontSession, ApiResponse<CheckoutResponse>), ServiceError> {
        let ctx = OperationContext::start("Checkout", Method::Post);
        let result = self.do_checkout(session, address, user_id).await;
        self.run(ctx, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::PromoCode,
        test_support::{
            InMemoryOrders, InMemoryProducts, InMemoryPromoCodes, InMemoryUsers, product, registry,
        },
    };
    use chrono::Duration;

    struct Fixture {
        service: CartService,
        orders: Arc<InMemoryOrders>,
        users: Arc<InMemoryUsers>,
    }

    fn promo(code: &str, discount: i64, expires_in: Option<Duration>, limit: Option<i32>, used: i32) -> PromoCode {
        PromoCode {
            promo_code_id: 1,
            promo_code: code.to_string(),
            discount,
            expires_at: expires_in.map(|d| Utc::now().naive_utc() + d),
            usage_limit: limit,
            used_count: used,
        }
    }

    async fn fixture() -> Fixture {
        let mut hidden = product(3, "Retired Hat", 7);
        hidden.available = false;

        let products = InMemoryProducts::with(vec![
            product(1, "Linen Shirt", 10),
            product(2, "Wool Socks", 5),
            hidden,
        ]);
        let promo_codes = InMemoryPromoCodes::with(vec![
            promo("SPRING5", 5, Some(Duration::days(7)), Some(10), 2),
            promo("OLD", 5, Some(Duration::days(-1)), None, 0),
            promo("USEDUP", 5, None, Some(3), 3),
            promo("HUGE", 100, None, None, 0),
        ]);
        let orders = Arc::new(InMemoryOrders::default());
        let users = InMemoryUsers::with(Vec::new());

        let service = CartService::new(CartServiceDeps {
            products,
            promo_codes,
            customers: users.clone(),
            orders: orders.clone(),
            registry: registry(),
        })
        .await;

        Fixture {
            service,
            orders,
            users,
        }
    }

    fn address() -> AddressRequest {
        AddressRequest {
            first_name: "Olena".into(),
            last_name: "Koval".into(),
            email: "olena@example.com".into(),
            city: "Lviv".into(),
            house: "12".into(),
            apartment: "4".into(),
        }
    }

    fn with_promo(session: StorefrontSession, code: &str) -> StorefrontSession {
        session.with_promo_code(code)
    }

    #[tokio::test]
    async fn empty_cart_totals_zero() {
        let f = fixture().await;

        let cart = f
            .service
            .compute_cart_view(&StorefrontSession::default())
            .await
            .unwrap();

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);
    }

    #[tokio::test]
    async fn total_is_sum_of_lines_minus_active_discount() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(1, 2).with_added(2, 1);

        let plain = f.service.compute_cart_view(&session).await.unwrap();
        assert_eq!(plain.subtotal, 25);
        assert_eq!(plain.total, 25);

        let discounted = f
            .service
            .compute_cart_view(&with_promo(session, "SPRING5"))
            .await
            .unwrap();
        assert_eq!(discounted.discount, 5);
        assert_eq!(discounted.total, 20);
    }

    #[tokio::test]
    async fn unusable_promo_codes_are_silently_ignored() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(1, 2).with_added(2, 1);

        for code in ["OLD", "USEDUP", "NOPE"] {
            let cart = f
                .service
                .compute_cart_view(&with_promo(session.clone(), code))
                .await
                .unwrap();
            assert_eq!(cart.discount, 0, "code {code}");
            assert_eq!(cart.total, 25, "code {code}");
        }
    }

    #[tokio::test]
    async fn total_can_go_negative() {
        let f = fixture().await;
        let session = with_promo(StorefrontSession::default().with_added(2, 1), "HUGE");

        let cart = f.service.compute_cart_view(&session).await.unwrap();

        assert_eq!(cart.total, -95);
    }

    #[tokio::test]
    async fn saturated_quantity_of_expensive_product_does_not_overflow() {
        let f = fixture().await;
        let products = InMemoryProducts::with(vec![
            product(4, "Gold Bar", i64::MAX / 2),
            product(1, "Linen Shirt", 10),
        ]);
        let service = CartService::new(CartServiceDeps {
            products,
            promo_codes: InMemoryPromoCodes::with(Vec::new()),
            customers: f.users.clone(),
            orders: f.orders.clone(),
            registry: registry(),
        })
        .await;
        let session = StorefrontSession::default()
            .with_added(4, i32::MAX)
            .with_added(4, 5)
            .with_added(1, 1);

        let cart = service.compute_cart_view(&session).await.unwrap();

        assert_eq!(session.quantity_of(4), Some(i32::MAX));
        assert_eq!(cart.subtotal, i64::MAX);
        assert_eq!(cart.total, i64::MAX);
    }

    #[tokio::test]
    async fn add_to_cart_accumulates_and_reports_product_name() {
        let f = fixture().await;

        let (session, _) = f
            .service
            .add_to_cart(StorefrontSession::default(), 1, 1)
            .await
            .unwrap();
        let (session, response) = f.service.add_to_cart(session, 1, 3).await.unwrap();

        assert_eq!(session.quantity_of(1), Some(4));
        assert_eq!(response.message, "3 Linen Shirt added to cart successfully!");
        assert_eq!(response.data.total, 40);
    }

    #[tokio::test]
    async fn add_to_cart_rejects_unavailable_or_unknown_products() {
        let f = fixture().await;

        for product_id in [3, 99] {
            let result = f
                .service
                .add_to_cart(StorefrontSession::default(), product_id, 1)
                .await;
            assert!(
                matches!(result, Err(ServiceError::NotFound(_))),
                "expected NotFound for {product_id}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn remove_from_cart_decrements_then_deletes() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(1, 3);

        let (session, _) = f.service.remove_from_cart(session, 1, 1).await.unwrap();
        assert_eq!(session.quantity_of(1), Some(2));

        let (session, response) = f.service.remove_from_cart(session, 1, 5).await.unwrap();
        assert_eq!(session.quantity_of(1), None);
        assert!(response.data.items.is_empty());
    }

    #[tokio::test]
    async fn apply_promo_code_reports_why_a_code_is_refused() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(1, 1);

        let blank = f.service.apply_promo_code(session.clone(), "  ").await;
        assert!(matches!(blank, Err(ServiceError::BadRequest(_))), "got {blank:?}");

        let unknown = f.service.apply_promo_code(session.clone(), "NOPE").await;
        assert!(matches!(unknown, Err(ServiceError::NotFound(_))), "got {unknown:?}");

        match f.service.apply_promo_code(session.clone(), "OLD").await {
            Err(ServiceError::BadRequest(msg)) => {
                assert_eq!(msg, "This promo code is no longer valid.")
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }

        match f.service.apply_promo_code(session.clone(), "USEDUP").await {
            Err(ServiceError::BadRequest(msg)) => {
                assert_eq!(msg, "This promo code has reached its usage limit.")
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }

        let (session, response) = f
            .service
            .apply_promo_code(session, "SPRING5")
            .await
            .unwrap();
        assert_eq!(session.promo_code.as_deref(), Some("SPRING5"));
        assert_eq!(response.data.total, 5);
    }

    #[tokio::test]
    async fn checkout_creates_one_pending_order_per_product_and_clears_session() {
        let f = fixture().await;
        let customer = f.users.add_customer(42);
        let session = with_promo(
            StorefrontSession::default().with_added(1, 2).with_added(2, 1),
            "SPRING5",
        );

        let (session, response) = f
            .service
            .checkout(session, &address(), Some(42))
            .await
            .unwrap();

        assert!(session.is_cart_empty());
        assert!(session.promo_code.is_none());

        let checkout = response.data;
        assert_eq!(checkout.redirect_to, "/order-success");
        assert_eq!(checkout.address.total_price, 20);
        assert_eq!(checkout.address.customer_id, Some(customer.customer_id));
        assert_eq!(checkout.orders.len(), 2);
        assert!(checkout.orders.iter().all(|o| o.status == "Pending"));

        let shirt = checkout.orders.iter().find(|o| o.product_id == 1).unwrap();
        assert_eq!((shirt.quantity, shirt.total_price), (2, 20));
        let socks = checkout.orders.iter().find(|o| o.product_id == 2).unwrap();
        assert_eq!((socks.quantity, socks.total_price), (1, 5));
    }

    #[tokio::test]
    async fn checkout_with_invalid_address_persists_nothing() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(1, 1);
        let mut bad = address();
        bad.email = "nope".into();
        bad.city = String::new();

        let result = f.service.checkout(session, &bad, None).await;

        match result {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.iter().any(|e| e.starts_with("email:")));
                assert!(errors.iter().any(|e| e.starts_with("city:")));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(f.orders.checkouts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn checkout_of_empty_cart_is_rejected() {
        let f = fixture().await;

        let result = f
            .service
            .checkout(StorefrontSession::default(), &address(), None)
            .await;

        assert!(matches!(result, Err(ServiceError::BadRequest(_))), "got {result:?}");
        assert!(f.orders.checkouts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn anonymous_checkout_has_no_customer() {
        let f = fixture().await;
        let session = StorefrontSession::default().with_added(2, 2);

        let (_, response) = f.service.checkout(session, &address(), None).await.unwrap();

        assert_eq!(response.data.address.customer_id, None);
        assert_eq!(response.data.orders[0].customer_id, None);
    }
}
