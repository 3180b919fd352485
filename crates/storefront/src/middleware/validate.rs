use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use shared::errors::{HttpError, ServiceError};
use validator::Validate;

/// JSON body that must also pass its `validator` rules.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| HttpError::from(ServiceError::from(errors)))?;

        Ok(Self(value))
    }
}

/// JSON body where an empty request falls back to `T::default()`.
pub struct LenientJson<T>(pub T);

impl<S, T> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::BadRequest(rejection.body_text()))?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&body)
            .map(Self)
            .map_err(|e| HttpError::BadRequest(format!("Invalid JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use shared::domain::requests::{AddToCartRequest, LoginRequest};

    fn json_request(body: &'static str) -> Request {
        Request::post("/")
            .header(axum::http::header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn empty_body_uses_defaults() {
        let LenientJson(req) = LenientJson::<AddToCartRequest>::from_request(json_request(""), &())
            .await
            .unwrap();

        assert_eq!(req.quantity, 1);
    }

    #[tokio::test]
    async fn malformed_body_is_a_bad_request() {
        let result =
            LenientJson::<AddToCartRequest>::from_request(json_request("{quantity"), &()).await;

        assert!(matches!(result, Err(HttpError::BadRequest(_))));
    }

    #[tokio::test]
    async fn validation_failures_are_reported_per_field() {
        let result = SimpleValidatedJson::<LoginRequest>::from_request(
            json_request(r#"{"username":"","password":""}"#),
            &(),
        )
        .await;

        match result {
            Err(HttpError::BadRequest(msg)) => assert!(msg.contains("username"), "got {msg}"),
            _ => panic!("expected a validation error"),
        }
    }
}
