mod auth;
mod cart;
mod category;
mod email;
mod hashing;
mod jwt;
mod order;
mod product;
mod promo_code;
mod reset_token;
mod session;
mod subscriber;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, DynPasswordResetService, DynRegisterService,
    IdentityServiceTrait, LoginServiceTrait, PasswordResetServiceTrait, RegisterServiceTrait,
};
pub use self::cart::{CartServiceTrait, DynCartService};
pub use self::category::{
    CategoryQueryRepositoryTrait, CategoryQueryServiceTrait, DynCategoryQueryRepository,
    DynCategoryQueryService,
};
pub use self::email::{DynEmailService, EmailRequest, EmailServiceTrait};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::order::{DynOrderCommandRepository, OrderCommandRepositoryTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductFilter, ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::promo_code::{DynPromoCodeQueryRepository, PromoCodeQueryRepositoryTrait};
pub use self::reset_token::{
    DynResetTokenCommandRepository, DynResetTokenQueryRepository,
    ResetTokenCommandRepositoryTrait, ResetTokenQueryRepositoryTrait,
};
pub use self::session::{DynSessionStore, SessionStoreTrait};
pub use self::subscriber::{
    DynSubscriberRepository, DynSubscriberService, SubscriberRepositoryTrait,
    SubscriberServiceTrait,
};
pub use self::user::{
    CustomerRepositoryTrait, DynCustomerRepository, DynUserCommandRepository,
    DynUserQueryRepository, UserCommandRepositoryTrait, UserQueryRepositoryTrait,
};
