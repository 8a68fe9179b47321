use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::requests::MemberGrade;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub member: MemberConfig,
    pub sms: SmsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let raw_grade = env::var("MEMBER_GRADE").unwrap_or_else(|_| "SILVER".to_string());
        let grade = MemberGrade::parse(&raw_grade)
            .ok_or_else(|| ConfigError::InvalidMemberGrade(raw_grade.clone()))?;
        let contact_number =
            env::var("MEMBER_CONTACT_NUMBER").unwrap_or_else(|_| "000-0000-0000".to_string());

        let raw_mode = env::var("SMS_MODE").unwrap_or_else(|_| "log".to_string());
        let mode = SmsMode::parse(&raw_mode).ok_or(ConfigError::InvalidSmsMode(raw_mode))?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            member: MemberConfig {
                grade,
                contact_number,
            },
            sms: SmsConfig { mode },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Member profile reported by the configured status provider.
#[derive(Debug, Clone)]
pub struct MemberConfig {
    pub grade: MemberGrade,
    pub contact_number: String,
}

/// Selects the SMS adapter wired into the service.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub mode: SmsMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsMode {
    /// Record the message in the log and report success.
    Log,
    /// Report every send as failed.
    Fail,
}

impl SmsMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "log" => Some(Self::Log),
            "fail" => Some(Self::Fail),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidMemberGrade(String),
    InvalidSmsMode(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMemberGrade(value) => write!(
                f,
                "MEMBER_GRADE '{}' must be one of SILVER, GOLD, PLATINUM, DIAMOND",
                value
            ),
            ConfigError::InvalidSmsMode(value) => {
                write!(f, "SMS_MODE '{}' must be 'log' or 'fail'", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidMemberGrade(_)
            | ConfigError::InvalidSmsMode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("MEMBER_GRADE");
        env::remove_var("MEMBER_CONTACT_NUMBER");
        env::remove_var("SMS_MODE");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.member.grade, MemberGrade::Silver);
        assert_eq!(config.sms.mode, SmsMode::Log);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_member_and_sms_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MEMBER_GRADE", "diamond");
        env::set_var("MEMBER_CONTACT_NUMBER", "010-1111-2222");
        env::set_var("SMS_MODE", "FAIL");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.member.grade, MemberGrade::Diamond);
        assert_eq!(config.member.contact_number, "010-1111-2222");
        assert_eq!(config.sms.mode, SmsMode::Fail);
        reset_env();
    }

    #[test]
    fn rejects_unknown_member_grade() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MEMBER_GRADE", "bronze");
        match AppConfig::load() {
            Err(ConfigError::InvalidMemberGrade(value)) => assert_eq!(value, "bronze"),
            other => panic!("expected invalid grade, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        assert!(matches!(AppConfig::load(), Err(ConfigError::InvalidPort)));
        reset_env();
    }
}
