//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that runs `Validate` before the handler sees the value.
///
/// Malformed JSON rejects with [`AppError::JsonExtractorRejection`], failed validation
/// with [`AppError::ValidationError`] carrying per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct SaveItem {
///     #[validate(length(max = 255))]
///     description: Option<String>,
/// }
///
/// async fn save(ValidatedJson(payload): ValidatedJson<SaveItem>) -> String {
///     format!("{:?}", payload.description)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(max = 5))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(p): ValidatedJson<Payload>| async move { p.name }),
        )
    }

    async fn post_json(body: &'static str) -> StatusCode {
        app()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        assert_eq!(post_json(r#"{"name":"milk"}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_bad_request() {
        assert_eq!(
            post_json(r#"{"name":"much too long"}"#).await,
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        assert_eq!(post_json(r#"{"name":"#).await, StatusCode::BAD_REQUEST);
    }
}
