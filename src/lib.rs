//! # Loyalty Quote
//!
//! Loyalty points quote service.
//!
//! A quote turns a fare into base points, adds a tier bonus and an optional
//! promotion bonus, and caps the total. Two upstream services are consulted:
//!
//! - the FX service, behind a circuit breaker with one retry; its failure
//!   fails the quote
//! - the promotion service, raced against a short deadline; its failure
//!   only drops the promotion bonus
//!
//! # Layout
//!
//! - [`domain`]: Request, promotion and quote types, point arithmetic
//! - [`application`]: Quote orchestration, circuit breaker, retry, lookups
//! - [`infrastructure`]: HTTP adapters, configuration, tracing set-up
//! - [`api`]: axum router and handlers

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
