use morpha_tensor::Tensor;

use crate::border::BorderMode;
use crate::morphology::{grey_dilation, grey_erosion, Footprint, MorphologyError};

/// The kind of regional extremum to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Samples not smaller than any neighbor.
    Maxima,
    /// Samples not larger than any neighbor.
    Minima,
}

/// Detect regional maxima or minima of an N-dimensional array.
///
/// The neighborhood of every sample is given by `footprint` and out-of-bounds
/// neighbors are resolved with [`BorderMode::Reflect`]. A sample is a regional
/// maximum when it is at least as large as every neighbor while its
/// neighborhood is not flat; minima are defined symmetrically. Samples inside a
/// perfectly constant neighborhood are never marked, including every sample of
/// a constant array.
///
/// This is a local approximation of the connected-plateau definition of
/// regional extrema: plateaus wider than the footprint may be classified
/// differently near their edges.
///
/// # Arguments
///
/// * `image` - The input array of any rank.
/// * `footprint` - The neighborhood compared at each sample.
/// * `extremum` - Whether to detect maxima or minima.
///
/// # Returns
///
/// A freshly allocated mask of the same shape holding 1 at detected extrema and 0 elsewhere.
pub fn find_regional_extrema<T, const N: usize>(
    image: &Tensor<T, N>,
    footprint: &Footprint<N>,
    extremum: Extremum,
) -> Result<Tensor<u8, N>, MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let mut local_max = image.clone();
    grey_dilation(image, &mut local_max, footprint, BorderMode::Reflect)?;

    let mut local_min = image.clone();
    grey_erosion(image, &mut local_min, footprint, BorderMode::Reflect)?;

    // (extremum or flat) and not flat
    let (extremum_or_flat, not_flat) = match extremum {
        Extremum::Maxima => (
            image.zip_map(&local_max, |value, hi| value >= hi)?,
            image.zip_map(&local_min, |value, lo| value > lo)?,
        ),
        Extremum::Minima => (
            image.zip_map(&local_min, |value, lo| value <= lo)?,
            image.zip_map(&local_max, |value, hi| value < hi)?,
        ),
    };
    let mask = extremum_or_flat.zip_map(&not_flat, |&a, &b| u8::from(a && b))?;

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "regional {:?}: marked {} of {} samples, shape {:?}, footprint {:?} with {} offsets",
            extremum,
            count_marked(&mask),
            mask.numel(),
            mask.shape,
            footprint.shape(),
            footprint.num_active(),
        );
    }

    Ok(mask)
}

/// Detect regional maxima of an N-dimensional array.
///
/// See [`find_regional_extrema`] for the exact definition.
///
/// # Example
///
/// ```
/// use morpha_imgproc::{extrema::find_regional_maxima, morphology::Footprint};
/// use morpha_tensor::Tensor;
///
/// let image = Tensor::<i32, 1>::from_shape_vec([7], vec![0, 0, 0, 5, 0, 0, 0]).unwrap();
/// let footprint = Footprint::full([3]).unwrap();
/// let mask = find_regional_maxima(&image, &footprint).unwrap();
/// assert_eq!(mask.as_slice(), &[0, 0, 0, 1, 0, 0, 0]);
/// ```
pub fn find_regional_maxima<T, const N: usize>(
    image: &Tensor<T, N>,
    footprint: &Footprint<N>,
) -> Result<Tensor<u8, N>, MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    find_regional_extrema(image, footprint, Extremum::Maxima)
}

/// Detect regional minima of an N-dimensional array.
///
/// See [`find_regional_extrema`] for the exact definition.
pub fn find_regional_minima<T, const N: usize>(
    image: &Tensor<T, N>,
    footprint: &Footprint<N>,
) -> Result<Tensor<u8, N>, MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    find_regional_extrema(image, footprint, Extremum::Minima)
}

/// Number of marked samples in a mask.
pub fn count_marked<const N: usize>(mask: &Tensor<u8, N>) -> usize {
    mask.iter().filter(|&&v| v != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isolated_peak_1d() -> Result<(), MorphologyError> {
        let image = Tensor::<i32, 1>::from_shape_vec([7], vec![0, 0, 0, 5, 0, 0, 0])?;
        let footprint = Footprint::full([3])?;

        let maxima = find_regional_maxima(&image, &footprint)?;
        assert_eq!(maxima.as_slice(), &[0, 0, 0, 1, 0, 0, 0]);

        // samples 1 and 5 sit in flat neighborhoods, the endpoints tie with their reflection
        let minima = find_regional_minima(&image, &footprint)?;
        assert_eq!(minima.as_slice(), &[0, 0, 1, 0, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn constant_image() -> Result<(), MorphologyError> {
        let image = Tensor::<f32, 2>::from_shape_val([4, 5], 3.5);
        let footprint = Footprint::connectivity(2);
        let maxima = find_regional_maxima(&image, &footprint)?;
        let minima = find_regional_minima(&image, &footprint)?;
        assert_eq!(maxima.shape, [4, 5]);
        assert_eq!(count_marked(&maxima), 0);
        assert_eq!(count_marked(&minima), 0);
        Ok(())
    }

    #[test]
    fn peak_and_pit_2d() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let image = Tensor::<u8, 2>::from_shape_vec([5, 5], vec![
            1, 1, 1, 1, 0,
            1, 1, 1, 1, 1,
            1, 1, 9, 1, 1,
            1, 1, 1, 1, 1,
            1, 1, 1, 1, 1,
        ])?;
        let footprint = Footprint::connectivity(2);

        // the plateau samples next to the pit count as maxima of their neighborhood
        #[rustfmt::skip]
        let expected_max = [
            0, 0, 0, 1, 0,
            0, 0, 0, 0, 1,
            0, 0, 1, 0, 0,
            0, 0, 0, 0, 0,
            0, 0, 0, 0, 0,
        ];
        let maxima = find_regional_maxima(&image, &footprint)?;
        assert_eq!(maxima.as_slice(), &expected_max);

        #[rustfmt::skip]
        let expected_min = [
            0, 0, 0, 0, 1,
            0, 1, 1, 0, 0,
            0, 1, 0, 1, 0,
            0, 1, 1, 1, 0,
            0, 0, 0, 0, 0,
        ];
        let minima = find_regional_minima(&image, &footprint)?;
        assert_eq!(minima.as_slice(), &expected_min);
        Ok(())
    }

    #[test]
    fn single_voxel_3d() -> Result<(), MorphologyError> {
        let image =
            Tensor::<f64, 3>::from_shape_fn([3, 3, 3], |idx| f64::from(u8::from(idx == [1, 1, 1])));
        let footprint = Footprint::connectivity(1);

        let maxima = find_regional_maxima(&image, &footprint)?;
        assert_eq!(count_marked(&maxima), 1);
        assert_eq!(maxima.get([1, 1, 1]), Some(&1));

        // only the face neighbors see the voxel through the 6-connected footprint
        let minima = find_regional_minima(&image, &footprint)?;
        assert_eq!(count_marked(&minima), 6);
        assert_eq!(minima.get([0, 1, 1]), Some(&1));
        assert_eq!(minima.get([0, 0, 1]), Some(&0));
        Ok(())
    }

    #[test]
    fn empty_image() -> Result<(), MorphologyError> {
        let image = Tensor::<u16, 2>::from_shape_val([0, 8], 0);
        let mask = find_regional_maxima(&image, &Footprint::connectivity(1))?;
        assert_eq!(mask.shape, [0, 8]);
        Ok(())
    }
}
