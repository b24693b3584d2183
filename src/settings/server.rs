use serde::Deserialize;
use std::env;
use std::net::{IpAddr, SocketAddr};
use super::SettingsError;

#[derive(Clone, Debug, Deserialize)]
pub struct ServerSettings {
    /// 바인딩 주소 (기본값: 0.0.0.0)
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP 포트 (기본값: 80)
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

fn default_bind_address() -> String { "0.0.0.0".to_string() }
fn default_http_port() -> u16 { 80 }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl ServerSettings {
    const MIN_PORT: u16 = 1;
    const MAX_PORT: u16 = 65535;

    fn parse_port(name: &str, value: &str) -> Result<u16, SettingsError> {
        let port = value.parse::<u16>().map_err(|_| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: value.to_string(),
            reason: format!("포트는 {}-{} 범위여야 합니다", Self::MIN_PORT, Self::MAX_PORT),
        })?;

        if port < Self::MIN_PORT {
            return Err(SettingsError::EnvVarInvalid {
                var_name: name.to_string(),
                value: value.to_string(),
                reason: "포트는 0이 될 수 없습니다".to_string(),
            });
        }

        Ok(port)
    }

    pub fn from_env() -> Result<Self, SettingsError> {
        let http_port = Self::parse_port(
            "HOSTMUX_HTTP_PORT",
            &env::var("HOSTMUX_HTTP_PORT").unwrap_or_else(|_| default_http_port().to_string())
        )?;

        let settings = Self {
            bind_address: env::var("HOSTMUX_BIND_ADDRESS").unwrap_or_else(|_| default_bind_address()),
            http_port,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.bind_address.parse::<IpAddr>().is_err() {
            return Err(SettingsError::InvalidConfig(
                format!("유효하지 않은 바인딩 주소: {}", self.bind_address)
            ));
        }

        if self.http_port < Self::MIN_PORT {
            return Err(SettingsError::InvalidConfig(
                "HTTP 포트는 0이 될 수 없습니다".to_string()
            ));
        }

        Ok(())
    }

    /// 리스너가 바인딩할 소켓 주소를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        let ip = self.bind_address.parse::<IpAddr>().map_err(|e| {
            SettingsError::InvalidConfig(format!("유효하지 않은 바인딩 주소 {}: {}", self.bind_address, e))
        })?;
        Ok(SocketAddr::new(ip, self.http_port))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            http_port: default_http_port(),
        }
    }
}
