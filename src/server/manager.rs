use std::sync::Arc;

use hyper::body::Incoming;
use tracing::info;

use crate::routing::HostRouter;
use crate::settings::Settings;
use super::handler::RequestHandler;
use super::listener::ServerListener;
use super::static_response::StaticResponse;
use super::Result;

/// 설정으로부터 라우터를 구성하고 리스너를 실행하는 서버 매니저입니다.
pub struct ServerManager {
    pub config: Settings,
    pub router: Arc<HostRouter<Incoming>>,
}

impl ServerManager {
    pub fn new(config: Settings) -> Result<Self> {
        let router = Arc::new(build_router(&config)?);
        Ok(Self { config, router })
    }

    pub async fn start(self) -> Result<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = ServerListener::bind(addr).await?;
        let handler = Arc::new(RequestHandler::new(self.router));
        listener.run(handler).await
    }
}

/// 설정의 가상 호스트마다 고정 응답 핸들러를 등록합니다.
pub fn build_router(config: &Settings) -> Result<HostRouter<Incoming>> {
    let router = HostRouter::new();

    for vhost in &config.vhosts {
        let handler = StaticResponse::from_settings(&vhost.response)?;
        router.host(handler, &vhost.hosts);
        info!(hosts = ?vhost.hosts, "가상 호스트 등록");
    }

    if let Some(fallback) = &config.fallback {
        router.set_default(StaticResponse::from_settings(fallback)?);
        info!("기본 응답 등록");
    }

    Ok(router)
}
