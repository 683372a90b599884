//! CORS pipeline stage.
//!
//! First logic stage for every request. Evaluates the `Origin` header against
//! the configured allow-list and answers pre-flight `OPTIONS` requests
//! directly so they never reach a route collaborator.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

/// Middleware applying the cross-origin policy.
///
/// An unlisted origin is not rejected here; the request proceeds without
/// access-control headers and the browser enforces same-origin rules.
pub async fn apply(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let policy = &state.config.cors;
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let matched = origin.filter(|o| policy.allows(o));

    // Pre-flight short-circuit: empty 204, never forwarded.
    if req.method() == Method::OPTIONS {
        tracing::debug!(path = %req.uri().path(), matched = matched.is_some(), "answering pre-flight");
        let mut response = StatusCode::NO_CONTENT.into_response();
        emit_headers(&state, &mut response, matched.as_deref());
        return response;
    }

    let mut response = next.run(req).await;
    emit_headers(&state, &mut response, matched.as_deref());
    response
}

fn emit_headers(state: &AppState, response: &mut Response, matched: Option<&str>) {
    let Some(origin) = matched else {
        return;
    };
    let Ok(origin_value) = HeaderValue::from_str(origin) else {
        return;
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin_value);
    // The allow-origin varies per request, so caches must key on Origin.
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));

    let policy = &state.config.cors;
    if policy.allow_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
            HeaderValue::from_static("true"),
        );
    }
    if let Ok(methods) = HeaderValue::from_str(&policy.methods_header()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, methods);
    }
    if let Ok(allow_headers) = HeaderValue::from_str(&policy.headers_header()) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, allow_headers);
    }
}
