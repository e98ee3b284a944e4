//! Request body decoding
//!
//! Decodes `application/x-www-form-urlencoded` and `application/json`
//! bodies into typed values, enforcing the configured size limit.

use http_body_util::{BodyExt, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE};
use hyper::Request;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Supported body encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Form,
    Json,
}

impl BodyFormat {
    /// Pick the decoder from a `Content-Type` value; absent means form
    pub fn from_content_type(value: Option<&str>) -> Result<Self, AppError> {
        let Some(value) = value else {
            return Ok(Self::Form);
        };
        let mime = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match mime.as_str() {
            "" | "application/x-www-form-urlencoded" => Ok(Self::Form),
            "application/json" => Ok(Self::Json),
            _ => Err(AppError::UnsupportedMediaType(mime)),
        }
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, AppError> {
        match self {
            Self::Form => serde_urlencoded::from_bytes(bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}"))),
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}"))),
        }
    }
}

/// Read and decode the whole request body
pub async fn decode_body<T, B>(req: Request<B>, max_body_size: u64) -> Result<T, AppError>
where
    T: DeserializeOwned,
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let format = BodyFormat::from_content_type(
        req.headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok()),
    )?;

    // Reject early when the declared length is already over the limit
    if let Some(size) = req
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
    {
        if size > max_body_size {
            return Err(AppError::PayloadTooLarge(max_body_size));
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    let bytes = match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            return Err(AppError::PayloadTooLarge(max_body_size));
        }
        Err(e) => return Err(AppError::BadRequest(format!("Failed to read body: {e}"))),
    };

    format.decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AgeValue, StudentInput};
    use http_body_util::Full;

    fn request(content_type: Option<&str>, body: &'static str) -> Request<Full<Bytes>> {
        let mut builder = Request::post("/students");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(Full::new(Bytes::from(body))).unwrap()
    }

    #[test]
    fn test_content_type_selection() {
        assert_eq!(BodyFormat::from_content_type(None).unwrap(), BodyFormat::Form);
        assert_eq!(
            BodyFormat::from_content_type(Some("application/json; charset=utf-8")).unwrap(),
            BodyFormat::Json
        );
        assert_eq!(
            BodyFormat::from_content_type(Some("Application/X-WWW-Form-Urlencoded")).unwrap(),
            BodyFormat::Form
        );
        assert!(matches!(
            BodyFormat::from_content_type(Some("text/plain")),
            Err(AppError::UnsupportedMediaType(m)) if m == "text/plain"
        ));
    }

    #[tokio::test]
    async fn test_decode_form_body() {
        let req = request(
            Some("application/x-www-form-urlencoded"),
            "name=Ana+Lee&age=11&grade=B%2B",
        );
        let input: StudentInput = decode_body(req, 1024).await.unwrap();
        assert_eq!(input.name.as_deref(), Some("Ana Lee"));
        assert_eq!(input.age, Some(AgeValue::Text("11".into())));
        assert_eq!(input.grade.as_deref(), Some("B+"));
    }

    #[tokio::test]
    async fn test_decode_json_body() {
        let req = request(Some("application/json"), r#"{"name":"Ana","age":11}"#);
        let input: StudentInput = decode_body(req, 1024).await.unwrap();
        assert_eq!(input.age, Some(AgeValue::Integer(11)));
        assert_eq!(input.grade, None);
    }

    #[tokio::test]
    async fn test_body_over_limit() {
        let req = request(None, "name=aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        let result: Result<StudentInput, _> = decode_body(req, 8).await;
        assert!(matches!(result, Err(AppError::PayloadTooLarge(8))));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let req = request(Some("application/json"), "{\"name\":");
        let result: Result<StudentInput, _> = decode_body(req, 1024).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
