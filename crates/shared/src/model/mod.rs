mod address;
mod category;
mod customer;
mod order;
mod product;
mod promo_code;
mod reset_token;
mod subscriber;
mod user;

pub use self::address::Address;
pub use self::category::Category;
pub use self::customer::Customer;
pub use self::order::{ORDER_STATUS_PENDING, Order};
pub use self::product::Product;
pub use self::promo_code::PromoCode;
pub use self::reset_token::ResetToken;
pub use self::subscriber::SubscribedUser;
pub use self::user::User;
