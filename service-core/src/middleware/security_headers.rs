use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Path prefix of the JSON API. Everything else is the static client bundle.
const API_PREFIX: &str = "/api/";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let is_api_route = req.uri().path().starts_with(API_PREFIX);

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        header::HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    if is_api_route {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        );
    } else {
        // Recipe images arrive as data: URLs
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            header::HeaderValue::from_static(
                "default-src 'self'; \
                 script-src 'self'; \
                 style-src 'self' 'unsafe-inline'; \
                 img-src 'self' data:; \
                 font-src 'self'; \
                 connect-src 'self'; \
                 frame-ancestors 'none'",
            ),
        );
    }

    response
}
