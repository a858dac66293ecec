use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

pub struct Config {
    pub port: u16,
    pub smtp: Option<SmtpConfig>,
}

pub struct SmtpConfig {
    pub host: String,
    /// Owner mailbox. Notifications are sent from and to this address.
    pub user: String,
    pub password: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            smtp: SmtpConfig::load(),
        }
    }
}

impl SmtpConfig {
    fn load() -> Option<Self> {
        let user = var("SMTP_USER").ok()?;
        let password = var("SMTP_PASSWORD").ok()?;

        Some(Self {
            host: var("SMTP_HOST").unwrap_or_else(|_| {
                info!("SMTP_HOST not set, using default: {DEFAULT_SMTP_HOST}");
                DEFAULT_SMTP_HOST.to_string()
            }),
            user,
            password,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
