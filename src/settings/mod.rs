use std::{env, fs, path::Path};
use serde::Deserialize;
use tracing::debug;

mod server;
pub mod logging;
mod error;
mod vhost;

pub use server::ServerSettings;
pub use logging::{LogFormat, LogOutput, LogSettings};
pub use error::SettingsError;
pub use vhost::{ResponseSettings, VirtualHostSettings};

pub type Result<T> = std::result::Result<T, SettingsError>;
pub use server::parse_env_var;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_FILE_ENV: &str = "HOSTMUX_CONFIG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    // 서버 설정
    #[serde(default)]
    pub server: ServerSettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,

    /// 가상 호스트 목록
    #[serde(default)]
    pub vhosts: Vec<VirtualHostSettings>,

    /// 매칭되는 호스트가 없을 때의 응답
    #[serde(default)]
    pub fallback: Option<ResponseSettings>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if let Ok(config_path) = env::var(CONFIG_FILE_ENV) {
            Self::from_toml_file(&config_path)
        } else {
            Self::from_env()
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings = Self::from_toml_str(&content)?;
        debug!(
            path = %path.as_ref().display(),
            vhosts = settings.vhosts.len(),
            "설정 파일 로드 완료"
        );
        Ok(settings)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 환경 변수로부터 설정을 만듭니다. 가상 호스트는 설정 파일로만 지정할 수 있습니다.
    pub fn from_env() -> Result<Self> {
        let settings = Self {
            server: ServerSettings::from_env()?,
            logging: LogSettings::from_env()?,
            vhosts: Vec::new(),
            fallback: None,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        for vhost in &self.vhosts {
            vhost.validate()?;
        }

        if let Some(fallback) = &self.fallback {
            fallback.validate()?;
        }

        Ok(())
    }
}
