use crate::{
    abstract_trait::{
        DynCartService, DynCategoryQueryService, DynCustomerRepository, DynEmailService,
        DynHashing, DynJwtService, DynOrderCommandRepository, DynPromoCodeQueryRepository,
        DynSubscriberRepository, DynSubscriberService, DynCategoryQueryRepository,
    },
    config::{ConnectionPool, SiteConfig},
    repository::{
        CategoryQueryRepository, CustomerRepository, OrderCommandRepository, ProductRepository,
        PromoCodeQueryRepository, ResetTokenRepository, SubscriberRepository, UserRepository,
    },
    service::{
        AuthService, AuthServiceDeps, CartService, CartServiceDeps, CategoryService,
        ProductService, ProductServiceDeps, SubscriberService, SubscriberServiceDeps,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: AuthService,
    pub category_service: DynCategoryQueryService,
    pub product_service: ProductService,
    pub cart_service: DynCartService,
    pub subscriber_service: DynSubscriberService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("category_service", &"<CategoryService>")
            .field("product_service", &self.product_service)
            .field("cart_service", &"<CartService>")
            .field("subscriber_service", &"<SubscriberService>")
            .finish()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub mailer: DynEmailService,
    pub site: SiteConfig,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            hash,
            jwt_config,
            mailer,
            site,
            registry,
        } = deps;

        let user_repository = UserRepository::new(pool.clone());
        let reset_token = ResetTokenRepository::new(pool.clone());
        let product_repository = ProductRepository::new(pool.clone());
        let customers = Arc::new(CustomerRepository::new(pool.clone())) as DynCustomerRepository;
        let categories =
            Arc::new(CategoryQueryRepository::new(pool.clone())) as DynCategoryQueryRepository;
        let promo_codes =
            Arc::new(PromoCodeQueryRepository::new(pool.clone())) as DynPromoCodeQueryRepository;
        let orders = Arc::new(OrderCommandRepository::new(pool.clone())) as DynOrderCommandRepository;
        let subscribers = Arc::new(SubscriberRepository::new(pool)) as DynSubscriberRepository;

        let auth_service = AuthService::new(AuthServiceDeps {
            hash,
            jwt: jwt_config,
            user_query: user_repository.query.clone(),
            user_command: user_repository.command,
            reset_token_query: reset_token.query,
            reset_token_command: reset_token.command,
            mailer,
            site,
            registry: registry.clone(),
        })
        .await;

        let category_service = Arc::new(
            CategoryService::new(categories.clone(), registry.clone()).await,
        ) as DynCategoryQueryService;

        let product_service = ProductService::new(ProductServiceDeps {
            query: product_repository.query.clone(),
            command: product_repository.command,
            categories,
            registry: registry.clone(),
        })
        .await;

        let cart_service = Arc::new(
            CartService::new(CartServiceDeps {
                products: product_repository.query,
                promo_codes,
                customers,
                orders,
                registry: registry.clone(),
            })
            .await,
        ) as DynCartService;

        let subscriber_service = Arc::new(
            SubscriberService::new(SubscriberServiceDeps {
                subscribers,
                users: user_repository.query,
                registry,
            })
            .await,
        ) as DynSubscriberService;

        Self {
            auth_service,
            category_service,
            product_service,
            cart_service,
            subscriber_service,
        }
    }
}
