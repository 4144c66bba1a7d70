use std::env;

use crate::constants::{MAX_ATTEMPTS_PER_WINDOW, RATE_LIMIT_TTL_SECS};

/// Feature toggles for the signup pipeline. Everything defaults to on; any
/// stage can be switched off per deployment without code changes.
#[derive(Debug, Clone)]
pub struct Features {
    pub email_notifications: bool,
    pub duplicate_checking: bool,
    pub spam_protection: bool,
    pub analytics: bool,
    pub rate_limiting: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            email_notifications: true,
            duplicate_checking: true,
            spam_protection: true,
            analytics: true,
            rate_limiting: true,
        }
    }
}

impl Features {
    fn from_env() -> Self {
        Self {
            email_notifications: env_flag("FEATURE_EMAIL_NOTIFICATIONS", true),
            duplicate_checking: env_flag("FEATURE_DUPLICATE_CHECKING", true),
            spam_protection: env_flag("FEATURE_SPAM_PROTECTION", true),
            analytics: env_flag("FEATURE_ANALYTICS", true),
            rate_limiting: env_flag("FEATURE_RATE_LIMITING", true),
        }
    }
}

/// Cross-origin policy, decided at configuration time rather than per
/// request. Production pins a single fixed origin; development allows all
/// callers.
#[derive(Debug, Clone)]
pub enum CorsOrigin {
    Any,
    Fixed(String),
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub notification_email: Option<String>,
    pub allowed_origin: CorsOrigin,
    pub rate_limit_max_attempts: u32,
    pub rate_limit_window_secs: u64,
    pub environment: String,
    pub features: Features,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/waitlist.db".to_string());

        let notification_email = env::var("NOTIFICATION_EMAIL").ok().filter(|v| !v.is_empty());

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let allowed_origin = match env::var("ALLOWED_ORIGIN") {
            Ok(origin) if origin == "*" => CorsOrigin::Any,
            Ok(origin) => CorsOrigin::Fixed(origin),
            Err(_) if environment == "production" => {
                CorsOrigin::Fixed("https://dvand.in".to_string())
            }
            Err(_) => CorsOrigin::Any,
        };

        let rate_limit_max_attempts = env::var("RATE_LIMIT_MAX_ATTEMPTS")
            .map(|v| v.parse())
            .unwrap_or(Ok(MAX_ATTEMPTS_PER_WINDOW))
            .map_err(|_| "Invalid RATE_LIMIT_MAX_ATTEMPTS")?;

        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .map(|v| v.parse())
            .unwrap_or(Ok(RATE_LIMIT_TTL_SECS))
            .map_err(|_| "Invalid RATE_LIMIT_WINDOW_SECS")?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            notification_email,
            allowed_origin,
            rate_limit_max_attempts,
            rate_limit_window_secs,
            environment,
            features: Features::from_env(),
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(default)
}
