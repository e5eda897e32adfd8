//! Correlation id extractor.
//!
//! The router stamps every request with `x-request-id`; handlers pass it on
//! as the correlation id of the command they issue.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The request's `x-request-id`, or a fresh UUID when none is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Ok(RequestId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> RequestId {
        let (mut parts, _) = request.into_parts();
        RequestId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn header_value_is_used() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "req-123")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await, RequestId("req-123".to_string()));
    }

    #[tokio::test]
    async fn missing_header_yields_uuid() {
        let RequestId(id) = extract(Request::builder().body(()).unwrap()).await;
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
