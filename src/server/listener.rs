use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};
use hyper_util::rt::TokioIo;
use tracing::{debug, error, info};
use super::handler::RequestHandler;
use super::Result;

/// 연결 수락 실패 후 첫 대기 시간
const ACCEPT_BACKOFF_BASE: Duration = Duration::from_millis(10);
/// 연결 수락 실패 후 최대 대기 시간
const ACCEPT_BACKOFF_MAX: Duration = Duration::from_secs(1);

/// 연속 실패 횟수에 따른 대기 시간 (2배씩 증가, 최대 1초)
fn accept_backoff(failures: u32) -> Duration {
    let factor = 1u32 << failures.saturating_sub(1).min(16);
    ACCEPT_BACKOFF_BASE.saturating_mul(factor).min(ACCEPT_BACKOFF_MAX)
}

pub struct ServerListener {
    http_listener: TcpListener,
}

impl ServerListener {
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let http_listener = TcpListener::bind(addr)
            .await
            .map_err(|e| {
                error!(error = %e, addr = %addr, "HTTP 포트 바인딩 실패");
                e
            })?;

        info!(addr = %http_listener.local_addr()?, "HTTP 리스너 시작");

        Ok(Self { http_listener })
    }

    /// 실제로 바인딩된 주소를 반환합니다. 포트 0으로 바인딩한 경우에 유용합니다.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.http_listener.local_addr()?)
    }

    pub async fn run(self, handler: Arc<RequestHandler>) -> Result<()> {
        let mut failures = 0u32;
        loop {
            match self.http_listener.accept().await {
                Ok((stream, peer)) => {
                    failures = 0;
                    debug!(peer = %peer, "HTTP 연결 수락");
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        if let Err(err) = handler.handle_connection(io).await {
                            error!(error = %err, "HTTP 연결 처리 실패");
                        }
                    });
                }
                Err(e) => {
                    // EMFILE 등은 곧바로 다시 실패하므로 잠시 쉬었다가 재시도
                    failures = failures.saturating_add(1);
                    let delay = accept_backoff(failures);
                    error!(error = %e, attempt = failures, delay_ms = delay.as_millis() as u64, "HTTP 연결 수락 실패, 재시도 예정");
                    sleep(delay).await;
                }
            }
        }
    }
}
