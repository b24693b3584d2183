pub mod handler;
pub mod listener;
pub mod error;
pub mod manager;
pub mod static_response;

pub type Result<T> = std::result::Result<T, Error>;

pub use error::Error;
pub use handler::RequestHandler;
pub use listener::ServerListener;
pub use manager::{build_router, ServerManager};
pub use static_response::StaticResponse;
