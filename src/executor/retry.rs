use std::time::Duration;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_micros(500);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// Exponential backoff for transport failures.
///
/// The delay after failed attempt `n` (zero based) is `base_delay * 2^n`.
/// Retrying stops once that delay would exceed `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY)
    }
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            base_delay,
            max_delay,
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        let factor = 2u32.checked_pow(attempt)?;
        let delay = self.base_delay.checked_mul(factor)?;
        (delay <= self.max_delay).then_some(delay)
    }

    /// Total number of attempts made before a persistent failure surfaces.
    pub fn max_attempts(&self) -> u32 {
        let retries = (0..)
            .take_while(|attempt| self.delay_for_attempt(*attempt).is_some())
            .count();
        retries as u32 + 1
    }
}
