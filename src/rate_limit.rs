/// Login rate limiting
use crate::config::RateLimitConfig;
use crate::error::{ApiError, ApiResult};
use governor::{
    clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota,
    RateLimiter as GovernorLimiter,
};
use std::num::NonZeroU32;

/// Per-email limiter for login attempts
///
/// Keyed by account so a brute-forced email does not lock everyone out.
/// State is in-process; each replica enforces its own quota.
pub struct LoginRateLimiter {
    enabled: bool,
    limiter: GovernorLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
}

impl LoginRateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        let por_minuto =
            NonZeroU32::new(config.login_attempts_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            enabled: config.enabled,
            limiter: GovernorLimiter::keyed(Quota::per_minute(por_minuto)),
        }
    }

    /// Check the quota for one email
    pub fn check(&self, email: &str) -> ApiResult<()> {
        if !self.enabled {
            return Ok(());
        }

        match self.limiter.check_key(&email.to_lowercase()) {
            Ok(_) => Ok(()),
            Err(_) => Err(ApiError::RateLimited),
        }
    }
}
