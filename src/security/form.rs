use std::borrow::Cow;

use axum::{
    async_trait,
    body::to_bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_LENGTH, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

pub const MAX_BODY_SIZE_BYTES: usize = 16 * 1024; // 16 KiB upper bound for form posts

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// `application/x-www-form-urlencoded` body with strict content-type and
/// size checks, reporting the offending field on deserialization failure.
///
/// A key sent more than once keeps its last value, as browsers and most
/// form handlers resolve it.
#[derive(Debug)]
pub struct ValidatedForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        validate_content_type(req.headers())?;
        validate_declared_length(req.headers())?;

        let body_bytes = to_bytes(req.into_body(), MAX_BODY_SIZE_BYTES)
            .await
            .map_err(|err| AppError::MalformedForm(format!("failed to read request body: {err}")))?;

        parse_form(&body_bytes).map(ValidatedForm)
    }
}

fn parse_form<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AppError> {
    let encoded = last_value_wins(bytes);
    let deserializer =
        serde_urlencoded::Deserializer::new(form_urlencoded::parse(encoded.as_bytes()));

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let error = err.into_inner();
        let message = if path.is_empty() || path == "." {
            format!("failed to parse form body: {error}")
        } else {
            format!("failed to parse form body at {path}: {error}")
        };
        AppError::MalformedForm(message)
    })
}

/// Re-encodes `bytes` with one pair per key, in first-seen order, holding the
/// value of the key's last occurrence.
fn last_value_wins(bytes: &[u8]) -> String {
    let mut pairs: Vec<(Cow<'_, str>, Cow<'_, str>)> = Vec::new();
    for (key, value) in form_urlencoded::parse(bytes) {
        match pairs.iter_mut().find(|(seen, _)| *seen == key) {
            Some(pair) => pair.1 = value,
            None => pairs.push((key, value)),
        }
    }

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

fn validate_content_type(headers: &HeaderMap) -> Result<(), AppError> {
    if let Some(value) = headers.get(CONTENT_TYPE)
        && let Ok(value) = value.to_str()
        && value.trim_start().starts_with(FORM_MEDIA_TYPE)
    {
        return Ok(());
    }

    Err(AppError::UnsupportedMediaType)
}

fn validate_declared_length(headers: &HeaderMap) -> Result<(), AppError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    match declared {
        Some(len) if len > MAX_BODY_SIZE_BYTES => Err(AppError::PayloadTooLarge),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct NameOnly {
        #[serde(default)]
        name: String,
    }

    #[test]
    fn test_content_type_must_be_urlencoded() {
        let mut headers = HeaderMap::new();
        assert!(matches!(
            validate_content_type(&headers),
            Err(AppError::UnsupportedMediaType)
        ));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(validate_content_type(&headers).is_err());

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(validate_content_type(&headers).is_ok());
    }

    #[test]
    fn test_oversized_declared_length_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from(MAX_BODY_SIZE_BYTES + 1));
        assert!(matches!(
            validate_declared_length(&headers),
            Err(AppError::PayloadTooLarge)
        ));

        headers.insert(CONTENT_LENGTH, HeaderValue::from(128usize));
        assert!(validate_declared_length(&headers).is_ok());
    }

    #[test]
    fn test_parse_form_decodes_percent_escapes() {
        let form: NameOnly = parse_form(b"name=Ana+Lopez%21").expect("valid form");
        assert_eq!(form.name, "Ana Lopez!");
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let form: NameOnly = parse_form(b"name=Ana&name=Bea").expect("valid form");
        assert_eq!(form.name, "Bea");
    }

    #[test]
    fn test_last_value_wins_preserves_first_seen_order() {
        assert_eq!(last_value_wins(b"a=1&b=2&a=3+4"), "a=3+4&b=2");
    }

    #[test]
    fn test_parse_form_reports_unknown_field() {
        let err = parse_form::<NameOnly>(b"name=Ana&extra=1").unwrap_err();
        match err {
            AppError::MalformedForm(message) => assert!(message.contains("extra")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
