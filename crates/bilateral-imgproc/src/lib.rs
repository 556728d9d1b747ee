#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the image processing operations.
pub mod error;

/// image filtering module.
pub mod filter;

/// operations to normalize sample buffers.
pub mod normalize;

/// image border padding.
pub mod padding;

/// module containing parallization utilities.
pub mod parallel;

pub use crate::error::FilterError;
