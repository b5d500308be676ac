//! # Upstream Services
//!
//! HTTP adapters for the services a quote depends on.
//!
//! - [`HttpFxService`]: Exchange rates, load-bearing
//! - [`HttpPromoService`]: Promotion terms, best-effort
//! - [`HttpClient`]: Shared reqwest wrapper
//! - [`RateSource`] / [`PromotionSource`]: Ports the application layer uses

pub mod error;
pub mod fx_service;
pub mod http_client;
pub mod promo_service;
pub mod traits;

pub use error::{UpstreamError, UpstreamResult};
pub use fx_service::{FX_SERVICE_NAME, HttpFxService};
pub use http_client::HttpClient;
pub use promo_service::{HttpPromoService, PROMO_SERVICE_NAME};
pub use traits::{PromotionSource, RateSource};
