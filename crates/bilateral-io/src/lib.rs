#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
pub mod error;

/// High-level image reading and writing functions.
///
/// See [`functional::read_image_any_gray8`] to load any supported file as grayscale.
pub mod functional;

pub use crate::error::IoError;
pub use crate::functional::{read_image_any, read_image_any_gray8, write_image_gray8, GenericImage};
