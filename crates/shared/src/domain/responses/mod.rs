mod api;
mod cart;
mod category;
mod checkout;
mod pagination;
mod product;
mod subscriber;
mod token;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::cart::{CartLineResponse, CartResponse};
pub use self::category::CategoryResponse;
pub use self::checkout::{AddressResponse, CheckoutResponse, OrderResponse};
pub use self::pagination::Pagination;
pub use self::product::{ProductListResponse, ProductResponse};
pub use self::subscriber::SubscriberResponse;
pub use self::token::TokenResponse;
pub use self::user::UserResponse;
