//! Filter operations
//!
//! This module provides the bilateral filter together with the kernels it is built from and a
//! separable Gaussian blur to compare it against.

/// Filter kernels
pub mod kernels;
pub use kernels::{RangeKernel, SpatialKernel};

/// Bilateral (edge-preserving) filter
mod bilateral;
pub use bilateral::*;

/// Filter operations
mod ops;
pub use ops::*;

/// Separable filter operations
mod separable_filter;
pub use separable_filter::*;
