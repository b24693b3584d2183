/// 핸들러 처리 중 발생한 에러입니다.
///
/// 라우터는 이 에러를 잡거나 감싸지 않고 그대로 호출자에게 전달합니다.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("핸들러 처리 오류: {0}")]
    Processing(String),

    #[error(transparent)]
    Hyper(#[from] hyper::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HandlerError {
    pub fn processing(message: impl Into<String>) -> Self {
        HandlerError::Processing(message.into())
    }
}
