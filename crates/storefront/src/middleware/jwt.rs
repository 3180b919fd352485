use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{abstract_trait::DynJwtService, config::ACCESS_TOKEN, errors::HttpError};

pub const TOKEN_COOKIE: &str = "token";

/// Id of the user the request was authenticated as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub i32);

fn bearer_token(cookie_jar: &CookieJar, req: &Request<Body>) -> Option<String> {
    cookie_jar
        .get(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
}

pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = bearer_token(&cookie_jar, &req).ok_or_else(|| {
        HttpError::Unauthorized("You are not logged in, please provide token".to_string())
    })?;

    let user_id = jwt
        .verify_token(&token, ACCESS_TOKEN)
        .map_err(|_| HttpError::Unauthorized("Invalid token".to_string()))?;

    req.extensions_mut().insert(AuthUser(user_id as i32));

    Ok(next.run(req).await)
}

/// Like [`auth_middleware`] but lets anonymous requests through with
/// `Option<AuthUser>` set to `None`. A present but invalid token is still rejected.
pub async fn optional_auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let user = match bearer_token(&cookie_jar, &req) {
        Some(token) => {
            let user_id = jwt
                .verify_token(&token, ACCESS_TOKEN)
                .map_err(|_| HttpError::Unauthorized("Invalid token".to_string()))?;
            Some(AuthUser(user_id as i32))
        }
        None => None,
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
