use bytes::Bytes;
use http_body_util::Full;
use hyper::{header, Response, StatusCode};

use super::HandlerResponse;

const NOT_FOUND_BODY: &[u8] = b"404 page not found\n";

/// 매칭되는 호스트도 기본 핸들러도 없을 때 돌려주는 404 응답을 만듭니다.
pub fn not_found() -> HandlerResponse {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Full::new(Bytes::from_static(NOT_FOUND_BODY)))
        .unwrap_or_else(|_| {
            let mut response = Response::new(Full::new(Bytes::from_static(NOT_FOUND_BODY)));
            *response.status_mut() = StatusCode::NOT_FOUND;
            response
        })
}
