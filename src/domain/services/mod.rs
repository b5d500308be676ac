//! # Domain Services
//!
//! Domain services encapsulating business logic that doesn't naturally
//! belong to a single entity or value object.
//!
//! ## Services
//!
//! - [`PointsCalculator`]: Base, tier and promotion point arithmetic

pub mod points_calculator;

pub use points_calculator::{DEFAULT_POINTS_CAP, PointsBreakdown, PointsCalculator};
