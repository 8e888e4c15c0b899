use morpha_tensor::Tensor;

use super::MorphologyError;

/// An N-dimensional morphological structuring element.
///
/// The footprint is a boolean mask whose `true` elements select the neighbors
/// compared at each sample. Axis `k` is centered at `shape[k] / 2`, so an
/// even-sized axis is centered on its upper middle element.
///
/// # Example
///
/// ```rust
/// use morpha_imgproc::morphology::Footprint;
///
/// // 4-connected neighborhood in 2D
/// let footprint = Footprint::<2>::connectivity(1);
/// assert_eq!(footprint.shape(), [3, 3]);
/// assert_eq!(footprint.num_active(), 5);
/// assert_eq!(footprint.center(), [1, 1]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint<const N: usize> {
    mask: Tensor<bool, N>,
}

impl<const N: usize> Footprint<N> {
    /// Create a footprint from a boolean mask.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyFootprint`] if any axis has length zero and
    /// [`MorphologyError::AllZeroFootprint`] if no element is `true`.
    pub fn new(mask: Tensor<bool, N>) -> Result<Self, MorphologyError> {
        if mask.shape.iter().any(|&d| d == 0) {
            return Err(MorphologyError::EmptyFootprint(mask.shape.to_vec()));
        }
        if !mask.iter().any(|&b| b) {
            return Err(MorphologyError::AllZeroFootprint);
        }
        Ok(Self { mask })
    }

    /// Create a box footprint with every element active.
    ///
    /// # Errors
    ///
    /// Returns [`MorphologyError::EmptyFootprint`] if any axis has length zero.
    pub fn full(shape: [usize; N]) -> Result<Self, MorphologyError> {
        Self::new(Tensor::from_shape_val(shape, true))
    }

    /// Create a `3 x 3 x ... x 3` footprint with the given connectivity.
    ///
    /// Elements at Manhattan distance up to `connectivity` from the center are
    /// active. A connectivity of 1 keeps only the axis neighbors, while any value
    /// of at least `N` activates the full box.
    pub fn connectivity(connectivity: usize) -> Self {
        let mask = Tensor::from_shape_fn([3; N], |index| {
            index.iter().filter(|&&i| i != 1).count() <= connectivity
        });
        // the center is always active, so the mask is never all-zero
        Self { mask }
    }

    /// The boolean mask backing the footprint.
    pub fn mask(&self) -> &Tensor<bool, N> {
        &self.mask
    }

    /// The shape of the footprint.
    pub fn shape(&self) -> [usize; N] {
        self.mask.shape
    }

    /// The index of the footprint origin.
    pub fn center(&self) -> [usize; N] {
        self.mask.shape.map(|d| d / 2)
    }

    /// Number of active elements.
    pub fn num_active(&self) -> usize {
        self.mask.iter().filter(|&&b| b).count()
    }

    /// Signed offsets of the active elements relative to the center, in row-major order.
    pub fn offsets(&self) -> Vec<[isize; N]> {
        let center = self.center();
        let relative: Tensor<[isize; N], N> = Tensor::from_shape_fn(self.shape(), |index| {
            std::array::from_fn(|k| index[k] as isize - center[k] as isize)
        });
        self.mask
            .iter()
            .zip(relative.iter())
            .filter(|(active, _)| **active)
            .map(|(_, &offset)| offset)
            .collect()
    }
}
