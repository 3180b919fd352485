use super::AuthUser;
use axum::{
    Extension, body::Body, http::Request, middleware::Next, response::IntoResponse,
};
use shared::{abstract_trait::DynIdentityService, errors::HttpError};
use tracing::warn;

/// Lets through users flagged as staff or superuser. Must run after `auth_middleware`.
pub async fn staff_middleware(
    Extension(identity): Extension<DynIdentityService>,
    req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let AuthUser(user_id) = req
        .extensions()
        .get::<AuthUser>()
        .copied()
        .ok_or_else(|| HttpError::Unauthorized("Missing user in request context".to_string()))?;

    let user = identity.get_me(user_id).await?;

    if !user.data.is_staff {
        warn!("⛔ User {user_id} attempted a staff-only action");
        return Err(HttpError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        ));
    }

    Ok(next.run(req).await)
}
