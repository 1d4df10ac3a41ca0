//! Inter-row pacing.
//!
//! The importer spaces consecutive row submissions by a fixed pause as a
//! crude rate-limit guard. The pause is configuration rather than a literal
//! so tests (and embedders) can switch it off; the CLI always runs the
//! defaults. There is no adaptive backoff and no detection of rate-limit
//! responses.

use std::time::Duration;

/// Fixed spacing between consecutive row submissions.
#[derive(Debug, Clone)]
pub struct PacingConfig {
    pub inter_row_delay: Duration,
    pub enabled: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            inter_row_delay: Duration::from_secs(30),
            enabled: true,
        }
    }
}

impl PacingConfig {
    /// No pauses at all.
    pub fn disabled() -> Self {
        Self {
            inter_row_delay: Duration::ZERO,
            enabled: false,
        }
    }

    /// Block until the next row may be submitted.
    pub async fn pause(&self) {
        if self.enabled && !self.inter_row_delay.is_zero() {
            tokio::time::sleep(self.inter_row_delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing_is_thirty_seconds() {
        let pacing = PacingConfig::default();
        assert!(pacing.enabled);
        assert_eq!(pacing.inter_row_delay, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_disabled_pacing_returns_immediately() {
        let pacing = PacingConfig::disabled();
        // Would time out the test suite if the pause actually slept.
        tokio::time::timeout(Duration::from_millis(50), pacing.pause())
            .await
            .unwrap();
    }
}
