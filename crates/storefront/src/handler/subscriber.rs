use crate::{middleware::LenientJson, state::AppState};
use axum::{
    Extension, Json, http::StatusCode, response::IntoResponse, routing::post,
};
use shared::{
    abstract_trait::DynSubscriberService,
    domain::{
        requests::SubscribeRequest,
        responses::{ApiResponse, SubscriberResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/newsletter",
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = ApiResponse<SubscriberResponse>),
        (status = 400, description = "Missing name/email or malformed email"),
        (status = 409, description = "Registered user's email or already subscribed")
    )
)]
pub async fn subscribe(
    Extension(service): Extension<DynSubscriberService>,
    LenientJson(body): LenientJson<SubscribeRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.subscribe(&body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub fn subscriber_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/newsletter", post(subscribe))
        .layer(Extension(app_state.di_container.subscriber_service.clone()))
}
