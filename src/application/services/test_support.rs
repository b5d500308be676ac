//! Scripted upstream sources for service tests.

use crate::domain::entities::PromotionResult;
use crate::domain::value_objects::Currency;
use crate::infrastructure::upstream::error::{UpstreamError, UpstreamResult};
use crate::infrastructure::upstream::traits::{PromotionSource, RateSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Rate source that replays queued outcomes, then repeats a fallback.
#[derive(Debug)]
pub struct ScriptedRateSource {
    script: Mutex<VecDeque<UpstreamResult<Decimal>>>,
    fallback: UpstreamResult<Decimal>,
    delay: Duration,
    calls: AtomicU32,
}

impl ScriptedRateSource {
    pub fn always(outcome: UpstreamResult<Decimal>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: outcome,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
        }
    }

    pub fn rate(rate: Decimal) -> Self {
        Self::always(Ok(rate))
    }

    pub fn failing() -> Self {
        Self::always(Err(UpstreamError::unexpected_status(500, "boom")))
    }

    pub fn then(self, outcome: UpstreamResult<Decimal>) -> Self {
        self.script.lock().push_back(outcome);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for ScriptedRateSource {
    fn service_name(&self) -> &str {
        "fx-service"
    }

    async fn fetch_rate(&self, _currency: Currency) -> UpstreamResult<Decimal> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.script.lock().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Promotion source with a fixed outcome and optional latency.
#[derive(Debug)]
pub struct ScriptedPromotionSource {
    outcome: UpstreamResult<PromotionResult>,
    delay: Duration,
    calls: AtomicU32,
    codes: Mutex<Vec<String>>,
}

impl ScriptedPromotionSource {
    pub fn returning(outcome: UpstreamResult<PromotionResult>) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            calls: AtomicU32::new(0),
            codes: Mutex::new(Vec::new()),
        }
    }

    pub fn promotion(bonus_percent: u32, expires_soon: bool) -> Self {
        Self::returning(Ok(PromotionResult::new(bonus_percent, expires_soon)))
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn codes(&self) -> Vec<String> {
        self.codes.lock().clone()
    }
}

#[async_trait]
impl PromotionSource for ScriptedPromotionSource {
    fn service_name(&self) -> &str {
        "promo-service"
    }

    async fn fetch_promotion(&self, code: &str) -> UpstreamResult<PromotionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes.lock().push(code.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}
