use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use hyper::{Request, Response};

use super::HandlerError;

/// 핸들러가 돌려주는 응답 타입입니다.
pub type HandlerResponse = Response<Full<Bytes>>;

/// 핸들러 처리 결과입니다.
pub type HandlerResult = Result<HandlerResponse, HandlerError>;

/// 여러 호스트나 라우터가 함께 참조하는 핸들러입니다.
pub type SharedHandler<B> = Arc<dyn Handler<B>>;

/// 요청 처리 트레이트
///
/// 요청을 받아 응답을 만드는 단일 메서드 인터페이스입니다.
/// `B`는 요청 바디 타입입니다.
#[async_trait]
pub trait Handler<B>: Send + Sync {
    /// HTTP 요청을 처리합니다.
    async fn handle(&self, req: Request<B>) -> HandlerResult;
}

#[async_trait]
impl<B, H> Handler<B> for Arc<H>
where
    B: Send + 'static,
    H: Handler<B> + ?Sized,
{
    async fn handle(&self, req: Request<B>) -> HandlerResult {
        (**self).handle(req).await
    }
}

/// 비동기 클로저를 `Handler`로 감싸는 어댑터입니다.
pub struct HandlerFn<F> {
    f: F,
}

/// 비동기 클로저로부터 핸들러를 만듭니다.
///
/// ```
/// use hostmux::routing::{handler_fn, Handler, HandlerResult};
/// use http_body_util::{Empty, Full};
/// use hyper::body::Bytes;
/// use hyper::{Request, Response};
///
/// let hello = handler_fn(|_req: Request<Empty<Bytes>>| async {
///     HandlerResult::Ok(Response::new(Full::new(Bytes::from("hello"))))
/// });
/// # let _ = &hello as &dyn Handler<Empty<Bytes>>;
/// ```
pub fn handler_fn<B, F, Fut>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<B>) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    HandlerFn { f }
}

#[async_trait]
impl<B, F, Fut> Handler<B> for HandlerFn<F>
where
    B: Send + 'static,
    F: Fn(Request<B>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, req: Request<B>) -> HandlerResult {
        (self.f)(req).await
    }
}
