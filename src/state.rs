use std::{sync::Arc, time::Duration};

use tracing::warn;

use crate::{
    config::Config,
    mail::{Mailer, SmtpMailer},
    rate_limit::RateLimiter,
};

/// Accepted submissions per address per window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 3;
/// Window applied to each address.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60 * 60);
/// Distinct addresses tracked before the quietest is evicted.
pub const RATE_LIMIT_CAPACITY: usize = 500;

pub struct AppState {
    pub config: Config,
    pub rate_limiter: RateLimiter,
    /// `None` when SMTP credentials are missing; submissions then fail with
    /// a configuration error instead of taking the process down.
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new() -> Arc<Self> {
        let config = Config::load();

        let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
            Some(smtp) => match SmtpMailer::new(smtp) {
                Ok(mailer) => Some(Arc::new(mailer)),
                Err(e) => {
                    warn!("Failed to initialize SMTP transport: {e}");
                    None
                }
            },
            None => {
                warn!("SMTP credentials missing, contact submissions will be rejected");
                None
            }
        };

        Arc::new(Self {
            config,
            rate_limiter: RateLimiter::new(
                RATE_LIMIT_CAPACITY,
                RATE_LIMIT_MAX_REQUESTS,
                RATE_LIMIT_WINDOW,
            ),
            mailer,
        })
    }
}
