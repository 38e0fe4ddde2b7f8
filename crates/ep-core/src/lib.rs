//! ep-core: measured quantities with symmetric uncertainties.
//!
//! Contains:
//! - measurement (value + error + units, with error propagation)
//! - numeric (Real, tolerances, quadrature, scalar trait)
//! - error (shared error types)
//!
//! Unit labels are opaque strings. Operations that need matching units
//! (comparison, addition, subtraction) return [`MeasResult`] and fail with
//! [`MeasError::IncompatibleUnits`] on mismatch. Multiplication and division
//! accept any units and concatenate the labels.

pub mod error;
pub mod measurement;
pub mod numeric;

pub use error::{MeasError, MeasResult};
pub use measurement::Measurement;
pub use numeric::*;
