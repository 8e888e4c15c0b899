#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! `morpha-tensor` provides [`Tensor`], an owned, contiguous, row-major array whose
//! rank is a const generic. Images, footprints and masks in `morpha` are all tensors.
//!
//! ```rust
//! use morpha_tensor::Tensor;
//!
//! let image = Tensor::<f32, 2>::from_shape_fn([3, 3], |[i, j]| (i + j) as f32);
//! let doubled = image.map(|x| x * 2.0);
//! assert_eq!(doubled.get([2, 2]), Some(&8.0));
//! ```

/// Tensor module containing the main tensor implementation and error types.
pub mod tensor;

pub use crate::tensor::{Tensor, TensorError};

/// Type alias for a 1-dimensional tensor.
pub type Tensor1<T> = Tensor<T, 1>;

/// Type alias for a 2-dimensional tensor.
pub type Tensor2<T> = Tensor<T, 2>;

/// Type alias for a 3-dimensional tensor.
pub type Tensor3<T> = Tensor<T, 3>;

/// Type alias for a 4-dimensional tensor.
pub type Tensor4<T> = Tensor<T, 4>;
