use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

/// Permanently redirects `/foo/` to `/foo`, keeping the query string. The root path passes
/// through. Leading slashes collapse to one so `//host/` never becomes a protocol-relative
/// `Location`.
pub async fn strip_trailing_slash(req: Request<Body>, next: Next) -> Response {
    let location = {
        let uri = req.uri();
        uri.path()
            .strip_suffix('/')
            .filter(|path| !path.is_empty())
            .map(|path| format!("/{}", path.trim_start_matches('/')))
            .map(|path| match uri.query() {
                Some(query) => format!("{path}?{query}"),
                None => path,
            })
    };

    match location {
        Some(location) => Redirect::permanent(&location).into_response(),
        None => next.run(req).await,
    }
}
