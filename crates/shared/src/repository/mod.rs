mod category;
mod customer;
mod order;
mod product;
mod promo_code;
mod reset_token;
mod subscriber;
mod user;

pub use self::category::CategoryQueryRepository;
pub use self::customer::CustomerRepository;
pub use self::order::OrderCommandRepository;
pub use self::product::ProductRepository;
pub use self::promo_code::PromoCodeQueryRepository;
pub use self::reset_token::ResetTokenRepository;
pub use self::subscriber::SubscriberRepository;
pub use self::user::UserRepository;
