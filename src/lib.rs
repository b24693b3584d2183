//! hostmux는 요청의 대상 호스트에 따라 하위 핸들러를 선택하는 HTTP 라우터입니다.
//!
//! # 주요 기능
//!
//! - 대소문자를 구분하지 않는 호스트 기반 라우팅
//! - 매칭되는 호스트가 없을 때의 기본 핸들러
//! - 기본 핸들러도 없으면 404 응답
//!
//! # 예제
//!
//! ```
//! use hostmux::routing::{handler_fn, HostRouter, HandlerResult};
//! use http_body_util::{BodyExt, Empty, Full};
//! use hyper::body::Bytes;
//! use hyper::{Request, Response};
//!
//! fn text(body: &'static str) -> HandlerResult {
//!     Ok(Response::new(Full::new(Bytes::from(body))))
//! }
//!
//! # tokio_test();
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn tokio_test() {
//! let router = HostRouter::new();
//! router
//!     .host(handler_fn(|_req: Request<Empty<Bytes>>| async { text("one") }), ["one.com"])
//!     .host(handler_fn(|_req: Request<Empty<Bytes>>| async { text("two") }), ["two.net", "www.two.net"])
//!     .set_default(handler_fn(|_req: Request<Empty<Bytes>>| async { text("else") }));
//!
//! let req = Request::builder()
//!     .header("Host", "WWW.Two.Net")
//!     .body(Empty::new())
//!     .unwrap();
//! let response = router.dispatch(Some(req)).await.unwrap();
//! let body = response.into_body().collect().await.unwrap().to_bytes();
//! assert_eq!(&body[..], b"two");
//! # }
//! ```
//!
//! # 핸들러 없는 등록
//!
//! 등록되는 핸들러는 항상 존재해야 합니다. "핸들러 없음"을 등록하는 것은
//! 컴파일 단계에서 거부됩니다.
//!
//! ```compile_fail
//! use hostmux::routing::HostRouter;
//! use http_body_util::Empty;
//! use hyper::body::Bytes;
//!
//! let router: HostRouter<Empty<Bytes>> = HostRouter::new();
//! router.host_shared(None, ["one.com"]);
//! ```

pub mod logging;
pub mod routing;
pub mod server;
pub mod settings;
