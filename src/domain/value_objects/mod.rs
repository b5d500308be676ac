//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Domain Enums
//!
//! - [`Currency`]: Fare currency
//! - [`CabinClass`]: Cabin of the fare
//! - [`CustomerTier`]: Loyalty tier and its bonus rate

pub mod enums;

pub use enums::{CabinClass, Currency, CustomerTier, ParseEnumError};
