use std::convert::Infallible;

use axum::{
    http::{HeaderValue, Request, header, header::HeaderName},
    middleware::Next,
    response::Response,
};

/// Pages load their script and stylesheet from `/assets`, so nothing inline
/// is ever needed and the form may only post back to this origin.
const CONTENT_SECURITY_POLICY: &str = "default-src 'none'; script-src 'self'; style-src 'self'; \
     img-src 'self'; form-action 'self'; frame-ancestors 'none'; base-uri 'none'";

const HARDENING_HEADERS: [(&str, &str); 5] = [
    ("content-security-policy", CONTENT_SECURITY_POLICY),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("permissions-policy", "geolocation=(), microphone=(), camera=()"),
];

pub async fn set_security_headers(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Infallible> {
    let mut response = next.run(req).await;
    apply_hardening_headers(&mut response);
    Ok(response)
}

fn apply_hardening_headers(response: &mut Response) {
    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"));

    let headers = response.headers_mut();
    for (name, value) in HARDENING_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    // Pages echo personal data back; keep them out of shared caches.
    if is_html && !headers.contains_key(header::CACHE_CONTROL) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
}

#[cfg(test)]
mod tests {
    use axum::response::{Html, IntoResponse};

    use super::*;

    #[test]
    fn test_html_pages_are_not_cached() {
        let mut response = Html("<p>roster</p>").into_response();
        apply_hardening_headers(&mut response);

        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );
        assert_eq!(
            response.headers().get("x-content-type-options"),
            Some(&HeaderValue::from_static("nosniff"))
        );
    }

    #[test]
    fn test_existing_cache_policy_is_kept() {
        let mut response =
            ([(header::CACHE_CONTROL, "public, max-age=3600")], "body").into_response();
        apply_hardening_headers(&mut response);

        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("public, max-age=3600"))
        );
        assert!(response.headers().contains_key("content-security-policy"));
    }
}
