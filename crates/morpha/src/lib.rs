#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use morpha_tensor as tensor;

#[doc(inline)]
pub use morpha_imgproc as imgproc;
