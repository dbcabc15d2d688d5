use crate::error::AppError;
use std::env;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Process-wide configuration, built once at startup and carried in AppState.
///
/// The OpenAI key and the database URL are deliberately optional: their
/// absence disables the corresponding capability per request (500 with an
/// explanatory body) rather than failing the whole process at boot.
#[derive(Debug, Clone)]
pub struct TutorConfig {
    pub port: u16,
    pub log_level: String,
    pub openai: OpenAiConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl TutorConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Ok(TutorConfig {
            port: parse_env("PORT", 8080)?,
            log_level: env_or("LOG_LEVEL", "info"),
            openai: OpenAiConfig {
                api_key: opt_env("OPENAI_API_KEY"),
                base_url: env_or("OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
                model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            },
            database: DatabaseConfig {
                url: opt_env("DATABASE_URL"),
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 5)?,
            },
        })
    }
}

/// Read an optional variable; blank values count as absent.
fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val.parse().map_err(|e| {
            AppError::Config(anyhow::anyhow!("{} has an invalid value '{}': {}", key, val, e))
        }),
        Err(_) => Ok(default),
    }
}
