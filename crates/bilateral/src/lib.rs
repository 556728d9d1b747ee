#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use bilateral_image as image;

#[doc(inline)]
pub use bilateral_imgproc as imgproc;

#[doc(inline)]
pub use bilateral_io as io;
