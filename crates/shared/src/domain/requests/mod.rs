mod auth;
mod cart;
mod catalog;
mod checkout;
mod product;
mod user;
mod reset_token;
mod subscriber;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::cart::{AddToCartRequest, ApplyPromoCodeRequest, RemoveFromCartRequest};
pub use self::catalog::{DEFAULT_PAGE_SIZE, FindAllProducts, MAX_PAGE_SIZE};
pub use self::checkout::{AddressRequest, CreateCheckoutRequest, NewOrderLine};
pub use self::product::{CreateProductRequest, UpdateProductRequest};
pub use self::reset_token::{ConfirmPasswordResetRequest, CreateResetTokenRequest, ForgotPasswordRequest};
pub use self::subscriber::SubscribeRequest;
pub use self::user::CreateUserRequest;
