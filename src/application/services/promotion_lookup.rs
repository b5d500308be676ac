//! # Promotion Lookup
//!
//! Best-effort promotion retrieval raced against a deadline.
//!
//! The upstream fetch runs in its own task and reports through a oneshot
//! channel. Whichever finishes first, the fetch or the deadline, decides the
//! result; every failure path degrades to [`PromotionResult::neutral`].
//! A fetch that loses the race keeps running until the HTTP client's own
//! timeout ends it, and its result is discarded.
//!
//! # Examples
//!
//! ```ignore
//! let lookup = PromotionLookup::new(promo_source, Duration::from_millis(300));
//! let promotion = lookup.get_promotion(Some("SUMMER25")).await;
//! ```

use crate::domain::entities::PromotionResult;
use crate::infrastructure::upstream::traits::PromotionSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Deadline-bounded promotion lookup that never fails.
#[derive(Debug, Clone)]
pub struct PromotionLookup {
    source: Arc<dyn PromotionSource>,
    timeout: Duration,
}

impl PromotionLookup {
    /// Creates a lookup with the given deadline.
    #[must_use]
    pub fn new(source: Arc<dyn PromotionSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }

    /// Returns the deadline.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves the terms of `code`, or the neutral promotion.
    ///
    /// Absent or blank codes return neutral without any network call.
    /// Other codes are passed to the source unchanged.
    pub async fn get_promotion(&self, code: Option<&str>) -> PromotionResult {
        let Some(code) = code.filter(|code| !code.trim().is_empty()) else {
            return PromotionResult::neutral();
        };

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let owned_code = code.to_string();
        tokio::spawn(async move {
            let outcome = source.fetch_promotion(&owned_code).await;
            if let Err(late) = tx.send(outcome) {
                debug!(
                    promo_code = %owned_code,
                    succeeded = late.is_ok(),
                    "discarding late promotion response"
                );
            }
        });

        tokio::select! {
            received = rx => match received {
                Ok(Ok(promotion)) => {
                    debug!(
                        promo_code = code,
                        bonus_percent = promotion.bonus_percent(),
                        expires_soon = promotion.expires_soon(),
                        "promotion resolved"
                    );
                    promotion
                }
                Ok(Err(error)) => {
                    warn!(promo_code = code, error = %error, "promotion lookup failed, using neutral promotion");
                    PromotionResult::neutral()
                }
                Err(_) => {
                    warn!(promo_code = code, "promotion lookup task ended without a result, using neutral promotion");
                    PromotionResult::neutral()
                }
            },
            () = tokio::time::sleep(self.timeout) => {
                warn!(
                    promo_code = code,
                    timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    "promotion lookup timed out, using neutral promotion"
                );
                PromotionResult::neutral()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::services::test_support::ScriptedPromotionSource;
    use crate::infrastructure::upstream::error::UpstreamError;

    fn lookup(source: &Arc<ScriptedPromotionSource>, timeout_ms: u64) -> PromotionLookup {
        PromotionLookup::new(
            Arc::clone(source) as Arc<dyn PromotionSource>,
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test]
    async fn absent_or_blank_code_skips_network() {
        let source = Arc::new(ScriptedPromotionSource::promotion(25, true));
        let lookup = lookup(&source, 300);

        assert!(lookup.get_promotion(None).await.is_neutral());
        assert!(lookup.get_promotion(Some("")).await.is_neutral());
        assert!(lookup.get_promotion(Some("   ")).await.is_neutral());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_response_wins() {
        let source = Arc::new(
            ScriptedPromotionSource::promotion(25, true).with_delay(Duration::from_millis(50)),
        );
        let promotion = lookup(&source, 300).get_promotion(Some("SUMMER25")).await;
        assert_eq!(promotion, PromotionResult::new(25, true));
        assert_eq!(source.codes(), vec!["SUMMER25".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn code_is_sent_unchanged() {
        let source = Arc::new(ScriptedPromotionSource::promotion(10, false));
        lookup(&source, 300).get_promotion(Some(" WINTER10 ")).await;
        assert_eq!(source.codes(), vec![" WINTER10 ".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_response_falls_back_to_neutral() {
        let source = Arc::new(
            ScriptedPromotionSource::promotion(25, true).with_delay(Duration::from_millis(800)),
        );
        let start = tokio::time::Instant::now();
        let promotion = lookup(&source, 200).get_promotion(Some("SUMMER25")).await;

        assert!(promotion.is_neutral());
        assert!(start.elapsed() < Duration::from_millis(800));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn upstream_error_falls_back_to_neutral() {
        let source = Arc::new(ScriptedPromotionSource::returning(Err(
            UpstreamError::unexpected_status(404, "unknown code"),
        )));
        let promotion = lookup(&source, 300).get_promotion(Some("NOPE")).await;
        assert!(promotion.is_neutral());
    }
}
