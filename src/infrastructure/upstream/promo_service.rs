//! # Promotion Service Adapter
//!
//! [`PromotionSource`] backed by the promotion service:
//! `GET {base}/promo/{code}` answering
//! `200 {"bonusPercent": <int>, "expiresSoon": <bool>}`.

use crate::domain::entities::PromotionResult;
use crate::infrastructure::upstream::error::UpstreamResult;
use crate::infrastructure::upstream::http_client::HttpClient;
use crate::infrastructure::upstream::traits::PromotionSource;
use async_trait::async_trait;

/// Upstream identity of the promotion service.
pub const PROMO_SERVICE_NAME: &str = "promo-service";

/// HTTP adapter for the promotion service.
#[derive(Debug, Clone)]
pub struct HttpPromoService {
    client: HttpClient,
    base_url: String,
}

impl HttpPromoService {
    /// Creates an adapter for the service at `base_url`.
    ///
    /// `timeout_ms` bounds the underlying request even after the caller has
    /// stopped waiting for it.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Configuration` if the HTTP client cannot be
    /// created.
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> UpstreamResult<Self> {
        Ok(Self {
            client: HttpClient::new(timeout_ms)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PromotionSource for HttpPromoService {
    fn service_name(&self) -> &str {
        PROMO_SERVICE_NAME
    }

    async fn fetch_promotion(&self, code: &str) -> UpstreamResult<PromotionResult> {
        let url = HttpClient::endpoint(&self.base_url, &["promo", code])?;
        self.client.get_json(url).await
    }
}
