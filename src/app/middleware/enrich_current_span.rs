use axum::{
    body::Body,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use tracing::Span;

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Fills the `http.*` fields declared empty on the request span.
pub async fn enrich_current_span_middleware(req: Request<Body>, next: Next) -> Response {
    let span = Span::current();
    let headers = req.headers();

    span.record("http.uri", req.uri().path());
    span.record(
        "http.host",
        header_str(headers, header::HOST).unwrap_or("UNKNOWN"),
    );
    if let Some(query) = req.uri().query() {
        span.record("http.query", query);
    }
    // Cross-origin callers are the browser frontend; worth seeing in logs.
    if let Some(origin) = header_str(headers, header::ORIGIN) {
        span.record("http.origin", origin);
    }

    next.run(req).await
}
