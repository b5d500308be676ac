//! # Application Layer
//!
//! Use-case orchestration on top of the domain.
//!
//! - [`services`]: Quote orchestration and upstream resilience
//! - [`error`]: Application error taxonomy

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, ErrorKind};
