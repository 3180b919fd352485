mod auth;
mod cart;
mod category;
mod email;
mod product;
mod subscriber;

pub use self::auth::{
    AuthService, AuthServiceDeps, IdentityService, LoginService, LoginServiceDeps,
    PasswordResetService, PasswordResetServiceDeps, RegisterService, RegisterServiceDeps,
};
pub use self::cart::{CartService, CartServiceDeps, ORDER_SUCCESS_PATH};
pub use self::category::CategoryService;
pub use self::email::EmailService;
pub use self::product::{
    ProductCommandService, ProductQueryService, ProductService, ProductServiceDeps,
};
pub use self::subscriber::{SubscriberService, SubscriberServiceDeps};
