//! # Domain Entities
//!
//! Request, promotion and quote types flowing through a points quote.
//!
//! - [`QuoteRequest`]: Raw inbound request
//! - [`ValidatedQuoteRequest`]: Typed request after validation
//! - [`PromotionResult`]: Bonus terms of a promotion code
//! - [`QuoteResponse`]: The computed quote

pub mod points_quote;
pub mod promotion;
pub mod quote_request;

pub use points_quote::{QuoteResponse, QuoteWarning};
pub use promotion::PromotionResult;
pub use quote_request::{QuoteRequest, ValidatedQuoteRequest};
