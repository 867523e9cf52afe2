use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::invites::service::ErrorDetailPolicy;

/// Event link baked into the invitation body unless `INVITE_LINK` overrides it.
pub const DEFAULT_EVENT_LINK: &str = "https://partiful.com/e/O7quZS46xjzssWIWb5b8";

const DEFAULT_ALLOWED_DOMAIN: &str = "stanford.edu";
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 10;

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
    pub mail: MailConfig,
    pub invite: InviteConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            mail: MailConfig::from_env()?,
            invite: InviteConfig::from_env(),
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

/// Credentials and policy for the transactional mail provider. The sender
/// identity always comes from here, never from request input.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_key: String,
    pub sender: String,
    pub reply_to: Option<String>,
    pub timeout: Duration,
    pub error_detail: ErrorDetailPolicy,
}

impl MailConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("RESEND_API_KEY")
            .map_err(|_| ConfigError::MissingVar { name: "RESEND_API_KEY" })?;
        let sender =
            env::var("MAIL_FROM").map_err(|_| ConfigError::MissingVar { name: "MAIL_FROM" })?;
        let reply_to = env::var("MAIL_REPLY_TO")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let timeout_secs = env::var("MAIL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_MAIL_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let error_detail = match env::var("MAIL_ERROR_DETAIL") {
            Ok(value) => ErrorDetailPolicy::from_name(&value)
                .ok_or(ConfigError::InvalidErrorDetail { value })?,
            Err(_) => ErrorDetailPolicy::default(),
        };

        Ok(Self {
            api_key,
            sender,
            reply_to,
            timeout: Duration::from_secs(timeout_secs),
            error_detail,
        })
    }
}

/// Invitation content and access policy knobs.
#[derive(Debug, Clone)]
pub struct InviteConfig {
    pub event_link: String,
    pub allowed_domain: String,
}

impl InviteConfig {
    fn from_env() -> Self {
        let event_link =
            env::var("INVITE_LINK").unwrap_or_else(|_| DEFAULT_EVENT_LINK.to_string());
        let allowed_domain =
            env::var("APP_ALLOWED_DOMAIN").unwrap_or_else(|_| DEFAULT_ALLOWED_DOMAIN.to_string());

        Self {
            event_link,
            allowed_domain,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingVar { name: &'static str },
    InvalidTimeout,
    InvalidErrorDetail { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingVar { name } => write!(f, "{name} must be set"),
            ConfigError::InvalidTimeout => {
                write!(f, "MAIL_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidErrorDetail { value } => {
                write!(
                    f,
                    "MAIL_ERROR_DETAIL must be 'generic' or 'provider' (found '{value}')"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
