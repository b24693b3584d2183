use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::{Request, Response, StatusCode};

use crate::routing::{Handler, HandlerError, HandlerResult};
use crate::settings::{ResponseSettings, SettingsError};

/// 설정된 고정 응답을 돌려주는 핸들러입니다.
#[derive(Debug, Clone)]
pub struct StaticResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl StaticResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn from_settings(settings: &ResponseSettings) -> Result<Self, SettingsError> {
        let content_type = HeaderValue::from_str(&settings.content_type).map_err(|e| {
            SettingsError::InvalidConfig(format!("유효하지 않은 Content-Type: {}", e))
        })?;

        let mut response = Self::new(settings.status_code()?, settings.body.clone())
            .with_header(CONTENT_TYPE, content_type);

        for (name, value) in &settings.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SettingsError::InvalidConfig(format!("유효하지 않은 헤더 이름 {}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                SettingsError::InvalidConfig(format!("유효하지 않은 헤더 값: {}", e))
            })?;
            response = response.with_header(name, value);
        }

        Ok(response)
    }
}

#[async_trait]
impl<B> Handler<B> for StaticResponse
where
    B: Send + 'static,
{
    async fn handle(&self, _req: Request<B>) -> HandlerResult {
        let mut builder = Response::builder().status(self.status);
        if let Some(headers) = builder.headers_mut() {
            headers.extend(self.headers.clone());
        }
        builder
            .body(Full::new(self.body.clone()))
            .map_err(|e| HandlerError::processing(e.to_string()))
    }
}
