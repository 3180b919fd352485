mod jwt;
mod session;
mod staff;
mod validate;

pub use self::jwt::{AuthUser, TOKEN_COOKIE, auth_middleware, optional_auth_middleware};
pub use self::session::{SESSION_COOKIE, SessionContext, SessionManager, session_middleware};
pub use self::staff::staff_middleware;
pub use self::validate::{LenientJson, SimpleValidatedJson};
