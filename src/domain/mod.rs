//! # Domain Layer
//!
//! Types and rules of a loyalty points quote, free of I/O.
//!
//! - [`entities`]: Requests, promotions and quotes
//! - [`services`]: Point arithmetic
//! - [`value_objects`]: Domain enums

pub mod entities;
pub mod services;
pub mod value_objects;
