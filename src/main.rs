use hostmux::{
    logging,
    server::ServerManager,
    settings::Settings,
};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // 설정 로드
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 로깅 초기화
    if let Err(e) = logging::init_logging(&settings.logging) {
        eprintln!("로깅 초기화 실패: {}", e);
        std::process::exit(1);
    }

    info!(
        bind_address = %settings.server.bind_address,
        http_port = settings.server.http_port,
        vhosts = settings.vhosts.len(),
        "hostmux 시작"
    );

    let manager = match ServerManager::new(settings) {
        Ok(manager) => manager,
        Err(e) => {
            error!(error = %e, "라우터 구성 실패");
            std::process::exit(1);
        }
    };

    if let Err(e) = manager.start().await {
        error!(error = %e, "서버 실행 실패");
        std::process::exit(1);
    }
}
