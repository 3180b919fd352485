use crate::{
    middleware::{
        AuthUser, SessionContext, SessionManager, SimpleValidatedJson, TOKEN_COOKIE,
        auth_middleware, session_middleware,
    },
    state::AppState,
};
use axum::{
    Extension, Json,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use shared::{
    abstract_trait::{
        DynIdentityService, DynLoginService, DynPasswordResetService, DynRegisterService,
    },
    domain::{
        requests::{ConfirmPasswordResetRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use tracing::info;
use utoipa_axum::router::OpenApiRouter;

fn token_cookie(token: String) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn health_checker_handler() -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "message": "Storefront is up"
    }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid username or password.")
    ),
    tag = "Auth"
)]
pub async fn login_user_handler(
    cookie_jar: CookieJar,
    Extension(service): Extension<DynLoginService>,
    SimpleValidatedJson(body): SimpleValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.login(&body).await?;
    let jar = cookie_jar.add(token_cookie(response.data.access_token.clone()));
    Ok((StatusCode::OK, jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = ApiResponse<TokenResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    ),
    tag = "Auth"
)]
pub async fn register_user_handler(
    cookie_jar: CookieJar,
    Extension(service): Extension<DynRegisterService>,
    SimpleValidatedJson(body): SimpleValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.register(&body).await?;
    let jar = cookie_jar.add(token_cookie(response.data.access_token.clone()));
    Ok((StatusCode::CREATED, jar, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out, session flushed", body = serde_json::Value)
    ),
    tag = "Auth"
)]
pub async fn logout_handler(
    cookie_jar: CookieJar,
    Extension(manager): Extension<SessionManager>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    manager.flush(&session.id).await;
    info!("👋 Session flushed on logout");

    let jar = cookie_jar.remove(Cookie::build(TOKEN_COOKIE).path("/"));
    (
        StatusCode::OK,
        jar,
        Json(json!({
            "status": "success",
            "message": "You have successfully logged out."
        })),
    )
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<UserResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Auth"
)]
pub async fn get_me_handler(
    Extension(service): Extension<DynIdentityService>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_me(user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/password-reset",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent", body = ApiResponse<bool>),
        (status = 400, description = "An invalid email has been entered."),
        (status = 500, description = "Mail delivery failed")
    ),
    tag = "Auth"
)]
pub async fn forgot_password_handler(
    Extension(service): Extension<DynPasswordResetService>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.forgot(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/password-reset/confirm",
    request_body = ConfirmPasswordResetRequest,
    responses(
        (status = 200, description = "Password changed", body = ApiResponse<bool>),
        (status = 400, description = "Validation error or expired token"),
        (status = 404, description = "Unknown token")
    ),
    tag = "Auth"
)]
pub async fn reset_password_handler(
    Extension(service): Extension<DynPasswordResetService>,
    SimpleValidatedJson(body): SimpleValidatedJson<ConfirmPasswordResetRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.reset_password(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn auth_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let auth = &app_state.di_container.auth_service;

    let public_routes = OpenApiRouter::new()
        .route("/api/auth/register", post(register_user_handler))
        .route("/api/auth/login", post(login_user_handler))
        .route("/api/auth/password-reset", post(forgot_password_handler))
        .route(
            "/api/auth/password-reset/confirm",
            post(reset_password_handler),
        )
        .route("/api/healthchecker", get(health_checker_handler))
        .layer(Extension(auth.login.clone()))
        .layer(Extension(auth.register.clone()))
        .layer(Extension(auth.password_reset.clone()));

    let session_routes = OpenApiRouter::new()
        .route("/api/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn(session_middleware))
        .layer(Extension(app_state.session.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/auth/me", get(get_me_handler))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(auth.identity.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(session_routes).merge(private_routes)
}
