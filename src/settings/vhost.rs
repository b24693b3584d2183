use std::collections::HashMap;

use hyper::header::{HeaderName, HeaderValue};
use hyper::StatusCode;
use serde::Deserialize;
use tracing::warn;

use super::SettingsError;

/// 고정 응답 설정입니다.
#[derive(Clone, Debug, Deserialize)]
pub struct ResponseSettings {
    /// 응답 상태 코드 (기본값: 200)
    #[serde(default = "default_status")]
    pub status: u16,

    /// 응답 본문
    #[serde(default)]
    pub body: String,

    /// Content-Type 헤더 (기본값: text/plain; charset=utf-8)
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// 추가 응답 헤더
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_status() -> u16 { 200 }
fn default_content_type() -> String { "text/plain; charset=utf-8".to_string() }

impl ResponseSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.status_code()?;

        HeaderValue::from_str(&self.content_type).map_err(|e| {
            SettingsError::InvalidConfig(format!("유효하지 않은 Content-Type {}: {}", self.content_type, e))
        })?;

        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                SettingsError::InvalidConfig(format!("유효하지 않은 헤더 이름 {}: {}", name, e))
            })?;
            HeaderValue::from_str(value).map_err(|e| {
                SettingsError::InvalidConfig(format!("헤더 {}의 값이 유효하지 않음: {}", name, e))
            })?;
        }

        Ok(())
    }

    pub fn status_code(&self) -> Result<StatusCode, SettingsError> {
        StatusCode::from_u16(self.status).map_err(|e| {
            SettingsError::InvalidConfig(format!("유효하지 않은 상태 코드 {}: {}", self.status, e))
        })
    }
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            status: default_status(),
            body: String::new(),
            content_type: default_content_type(),
            headers: HashMap::new(),
        }
    }
}

/// 가상 호스트 하나에 대한 설정입니다.
///
/// ```toml
/// [[vhosts]]
/// hosts = ["two.net", "www.two.net"]
/// response = { body = "two" }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct VirtualHostSettings {
    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(default)]
    pub response: ResponseSettings,
}

impl VirtualHostSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        // 빈 호스트 목록은 등록 시 아무 일도 하지 않으므로 경고만 남김
        if self.hosts.is_empty() {
            warn!("호스트 목록이 비어 있는 가상 호스트 설정");
        }
        self.response.validate()
    }
}
