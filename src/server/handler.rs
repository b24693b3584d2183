use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Request, Response, StatusCode};
use tracing::{debug, error};
use uuid::Uuid;

use crate::logging::{log_request, RequestLog};
use crate::routing::HostRouter;

/// 들어온 연결을 호스트 라우터로 연결하는 요청 처리기입니다.
pub struct RequestHandler {
    router: Arc<HostRouter<Incoming>>,
}

impl RequestHandler {
    pub fn new(router: Arc<HostRouter<Incoming>>) -> Self {
        Self { router }
    }

    pub async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> Result<Response<Full<Bytes>>, Infallible> {
        let start_time = Instant::now();
        let mut log = RequestLog::new(Uuid::new_v4().to_string());
        log.with_request(&req);

        let response = match self.router.dispatch(Some(req)).await {
            Ok(response) => response,
            Err(e) => {
                error!(request_id = %log.request_id, error = %e, "핸들러 처리 실패");
                log.with_error(&e);
                error_response()
            }
        };

        log.with_response(response.status());
        log.with_duration(start_time.elapsed());
        log_request(&log);

        Ok(response)
    }

    pub async fn handle_connection<I>(&self, io: I) -> std::result::Result<(), hyper::Error>
    where
        I: hyper::rt::Read + hyper::rt::Write + Send + Unpin + 'static,
    {
        debug!("연결 처리 시작");
        http1::Builder::new()
            .serve_connection(io, service_fn(|req| self.handle_request(req)))
            .await
    }
}

const INTERNAL_ERROR_BODY: &str = "Internal Server Error\n";

/// 핸들러 에러에 대한 500 응답입니다.
///
/// 에러 내용은 로그에만 남기고 클라이언트에는 고정된 본문만 보냅니다.
pub fn error_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .body(Full::new(Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes())))
        .unwrap_or_else(|e| {
            error!(error = %e, "에러 응답 생성 실패");
            let mut response = Response::new(Full::new(Bytes::from_static(INTERNAL_ERROR_BODY.as_bytes())));
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })
}
