//! # FX Service Adapter
//!
//! [`RateSource`] backed by the FX service: `GET {base}/fx/{currency}`
//! answering `200 {"rate": <float>}`.

use crate::domain::value_objects::Currency;
use crate::infrastructure::upstream::error::UpstreamResult;
use crate::infrastructure::upstream::http_client::HttpClient;
use crate::infrastructure::upstream::traits::RateSource;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Upstream identity of the FX service.
pub const FX_SERVICE_NAME: &str = "fx-service";

#[derive(Debug, Deserialize)]
struct FxRateBody {
    rate: Decimal,
}

/// HTTP adapter for the FX service.
#[derive(Debug, Clone)]
pub struct HttpFxService {
    client: HttpClient,
    base_url: String,
}

impl HttpFxService {
    /// Creates an adapter for the service at `base_url`.
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

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RateSource for HttpFxService {
    fn service_name(&self) -> &str {
        FX_SERVICE_NAME
    }

    async fn fetch_rate(&self, currency: Currency) -> UpstreamResult<Decimal> {
        let url = HttpClient::endpoint(&self.base_url, &["fx", currency.code()])?;
        let body: FxRateBody = self.client.get_json(url).await?;
        tracing::debug!(%currency, rate = %body.rate, "fx rate received");
        Ok(body.rate)
    }
}
