use axum::{
    body::{boxed, Empty, Full, HttpBody},
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::{BufMut, BytesMut};
use etag::EntityTag;
use tracing::{error, trace};

/// Adds a strong etag to successful GET responses, answering 304 when it matches the
/// request's if-none-match.
pub async fn middleware_fn<B>(req: Request<B>, next: Next<B>) -> Response {
    if req.method() != Method::GET {
        return next.run(req).await;
    }

    let if_none_match = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<EntityTag>().ok());
    let path = req.uri().path().to_owned();

    let res = next.run(req).await;
    if !res.status().is_success() {
        return res;
    }

    let (mut parts, mut body) = res.into_parts();

    let mut body_bytes = BytesMut::new();
    while let Some(chunk) = body.data().await {
        match chunk {
            Ok(chunk) => body_bytes.put(chunk),
            Err(err) => {
                error!(path, %err, "failed to read response body");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    }
    let body_bytes = body_bytes.freeze();

    if body_bytes.is_empty() {
        trace!(path, "response without body, skipping etag");
        return Response::from_parts(parts, boxed(Empty::new()));
    }

    let etag = EntityTag::from_data(&body_bytes);
    if let Ok(etag_header) = HeaderValue::from_str(&etag.to_string()) {
        parts.headers.insert(header::ETAG, etag_header);
    }

    match if_none_match {
        Some(if_none_match) if etag.strong_eq(&if_none_match) => {
            trace!(path, %etag, "etag matches if-none-match");
            parts.status = StatusCode::NOT_MODIFIED;
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, boxed(Empty::new()))
        }
        _ => {
            trace!(path, %etag, "returning body with etag");
            Response::from_parts(parts, boxed(Full::new(body_bytes)))
        }
    }
}
