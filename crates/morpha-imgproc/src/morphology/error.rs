use morpha_tensor::TensorError;

/// Errors related to morphological operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MorphologyError {
    /// The footprint has at least one axis of length zero.
    #[error("Footprint has an empty dimension: shape {0:?}")]
    EmptyFootprint(Vec<usize>),

    /// No element of the footprint is active.
    #[error("All-zero footprint is not supported")]
    AllZeroFootprint,

    /// The source and destination shapes are incompatible.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}
