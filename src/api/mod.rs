//! # API Layer
//!
//! Inbound adapters. The service exposes a single REST surface.

pub mod rest;
