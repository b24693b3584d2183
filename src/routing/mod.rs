//! 호스트 기반 라우팅을 위한 핵심 기능을 제공하는 모듈입니다.

mod error;
mod handler;
mod host;
mod response;
mod router;

pub use error::HandlerError;
pub use handler::{handler_fn, Handler, HandlerFn, HandlerResponse, HandlerResult, SharedHandler};
pub use host::{extract_host, normalize_host};
pub use response::not_found;
pub use router::HostRouter;
