use anyhow::{Context, Result, anyhow};

use crate::config::RedisConfig;

fn required(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("Missing environment variable: {name}"))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from: String,
}

impl EmailConfig {
    pub fn init() -> Result<Self> {
        let smtp_server = required("SMTP_HOST")?;
        let smtp_user = required("SMTP_USERNAME")?;
        let smtp_pass = required("SMTP_PASSWORD")?;
        let smtp_port = optional("SMTP_PORT")
            .unwrap_or_else(|| "587".to_string())
            .parse::<u16>()
            .context("SMTP_PORT must be a valid u16 integer")?;
        let from = optional("SMTP_FROM").unwrap_or_else(|| "admin@example.com".to_string());

        Ok(Self {
            smtp_server,
            smtp_port,
            smtp_user,
            smtp_pass,
            from,
        })
    }
}

/// Public address of the storefront, used to build links in outgoing mail.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub domain: String,
    pub protocol: String,
    pub name: String,
}

impl SiteConfig {
    pub fn init() -> Self {
        Self {
            domain: optional("SITE_DOMAIN").unwrap_or_else(|| "127.0.0.1:8000".to_string()),
            protocol: optional("SITE_PROTOCOL").unwrap_or_else(|| "http".to_string()),
            name: optional("SITE_NAME").unwrap_or_else(|| "Website".to_string()),
        }
    }

    pub fn link(&self, path_and_query: &str) -> String {
        format!("{}://{}{}", self.protocol, self.domain, path_and_query)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub session_ttl_minutes: i64,
    pub redis: RedisConfig,
    pub email_config: EmailConfig,
    pub site: SiteConfig,
    pub otel_endpoint: Option<String>,
}

impl Config {
    pub fn init() -> Result<Self> {
        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;
        let run_migrations = parse_flag("RUN_MIGRATIONS", &required("RUN_MIGRATIONS")?)?;

        let port = required("PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let database_max_connections = optional("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32 integer")?;

        let session_ttl_minutes = optional("SESSION_TTL_MINUTES")
            .unwrap_or_else(|| "1440".to_string())
            .parse::<i64>()
            .context("SESSION_TTL_MINUTES must be a valid integer")?;

        // redis
        let redis_host = optional("REDIS_HOST").unwrap_or_else(|| "redis".to_string());
        let redis_port = optional("REDIS_PORT")
            .unwrap_or_else(|| "6379".to_string())
            .parse::<u16>()
            .context("REDIS_PORT must be a valid u16 integer")?;
        let redis_db = optional("REDIS_DB")
            .unwrap_or_else(|| "0".to_string())
            .parse::<u8>()
            .context("REDIS_DB must be a valid u8 integer")?;
        let redis = RedisConfig::new(redis_host, redis_port, redis_db, optional("REDIS_PASSWORD"));

        let email_config = EmailConfig::init().context("failed email config")?;

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            run_migrations,
            port,
            session_ttl_minutes,
            redis,
            email_config,
            site: SiteConfig::init(),
            otel_endpoint: optional("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_words_and_digits() {
        assert!(parse_flag("RUN_MIGRATIONS", "true").unwrap());
        assert!(!parse_flag("RUN_MIGRATIONS", "0").unwrap());
        assert!(parse_flag("RUN_MIGRATIONS", "yes").is_err());
    }

    #[test]
    fn site_link_joins_protocol_and_domain() {
        let site = SiteConfig {
            domain: "shop.example.com".into(),
            protocol: "https".into(),
            name: "Shop".into(),
        };

        assert_eq!(
            site.link("/reset-password?token=abc"),
            "https://shop.example.com/reset-password?token=abc"
        );
    }
}
