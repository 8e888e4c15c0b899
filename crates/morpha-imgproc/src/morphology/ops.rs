use morpha_tensor::{Tensor, TensorError};
use rayon::prelude::*;

use super::{Footprint, MorphologyError};
use crate::border::BorderMode;

/// Dilate an N-dimensional array using a [`Footprint`].
///
/// Each sample is replaced by the maximum value in the neighborhood defined by
/// the footprint reflected through its center, so `dst[p]` is the maximum of
/// `src[p - o]` over the active offsets `o`.
///
/// # Arguments
///
/// * `src` - The source array.
/// * `dst` - The destination array (will be overwritten).
/// * `footprint` - The structuring element ([`Footprint`]).
/// * `border` - The border handling mode ([`BorderMode`]).
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the shapes don't match.
///
/// # Example
///
/// ```
/// use morpha_imgproc::{border::BorderMode, morphology::{grey_dilation, Footprint}};
/// use morpha_tensor::Tensor;
///
/// let src = Tensor::<u8, 1>::from_shape_vec([5], vec![0, 0, 3, 0, 0]).unwrap();
/// let mut dst = src.clone();
/// let footprint = Footprint::full([3]).unwrap();
/// grey_dilation(&src, &mut dst, &footprint, BorderMode::Reflect).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 3, 3, 3, 0]);
/// ```
pub fn grey_dilation<T, const N: usize>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    footprint: &Footprint<N>,
    border: BorderMode<T>,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let offsets: Vec<[isize; N]> = footprint
        .offsets()
        .into_iter()
        .map(|o| o.map(|d| -d))
        .collect();
    rank_filter(src, dst, &offsets, border, |sample, acc| sample > acc)
}

/// Erode an N-dimensional array using a [`Footprint`].
///
/// Each sample is replaced by the minimum value in the neighborhood, so
/// `dst[p]` is the minimum of `src[p + o]` over the active offsets `o`.
///
/// # Arguments
///
/// * `src` - The source array.
/// * `dst` - The destination array (will be overwritten).
/// * `footprint` - The structuring element ([`Footprint`]).
/// * `border` - The border handling mode ([`BorderMode`]).
///
/// # Returns
///
/// Ok(()) on success, or [`MorphologyError`] if the shapes don't match.
pub fn grey_erosion<T, const N: usize>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    footprint: &Footprint<N>,
    border: BorderMode<T>,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let offsets = footprint.offsets();
    rank_filter(src, dst, &offsets, border, |sample, acc| sample < acc)
}

/// Opening: erosion followed by dilation.
///
/// Removes bright structures smaller than the footprint.
pub fn grey_opening<T, const N: usize>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    footprint: &Footprint<N>,
    border: BorderMode<T>,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let mut eroded = src.clone();
    grey_erosion(src, &mut eroded, footprint, border)?;
    grey_dilation(&eroded, dst, footprint, border)?;
    Ok(())
}

/// Closing: dilation followed by erosion.
///
/// Fills dark structures smaller than the footprint.
pub fn grey_closing<T, const N: usize>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    footprint: &Footprint<N>,
    border: BorderMode<T>,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
{
    let mut dilated = src.clone();
    grey_dilation(src, &mut dilated, footprint, border)?;
    grey_erosion(&dilated, dst, footprint, border)?;
    Ok(())
}

// Selects one sample per neighborhood; `replaces(sample, acc)` decides whether
// the candidate wins over the running value.
fn rank_filter<T, const N: usize, F>(
    src: &Tensor<T, N>,
    dst: &mut Tensor<T, N>,
    offsets: &[[isize; N]],
    border: BorderMode<T>,
    replaces: F,
) -> Result<(), MorphologyError>
where
    T: Copy + PartialOrd + Send + Sync,
    F: Fn(T, T) -> bool + Sync,
{
    if src.shape != dst.shape {
        return Err(TensorError::dimension_mismatch(
            "destination must have the source shape",
            &src.shape,
            &dst.shape,
        )
        .into());
    }

    if src.is_empty() {
        return Ok(());
    }

    let shape = src.shape;
    let strides = src.strides;
    let src_data = src.as_slice();
    let fill = match border {
        BorderMode::Constant(value) => Some(value),
        _ => None,
    };

    // one chunk per index along the outermost axis
    let chunk_len = strides.first().copied().unwrap_or(1);

    dst.as_slice_mut()
        .par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(outer, dst_chunk)| {
            let mut index = [0usize; N];
            if let Some(first) = index.first_mut() {
                *first = outer;
            }

            for dst_val in dst_chunk.iter_mut() {
                let mut acc: Option<T> = None;
                for offset in offsets {
                    let Some(sample) =
                        sample_at(src_data, &shape, &strides, &index, offset, &border).or(fill)
                    else {
                        continue;
                    };
                    acc = match acc {
                        Some(current) if !replaces(sample, current) => Some(current),
                        _ => Some(sample),
                    };
                }
                if let Some(value) = acc {
                    *dst_val = value;
                }
                advance(&mut index, &shape);
            }
        });

    Ok(())
}

#[inline]
fn sample_at<T: Copy, const N: usize>(
    data: &[T],
    shape: &[usize; N],
    strides: &[usize; N],
    index: &[usize; N],
    offset: &[isize; N],
    border: &BorderMode<T>,
) -> Option<T> {
    let mut flat = 0;
    for k in 0..N {
        let i = border.map_index(index[k] as isize + offset[k], shape[k])?;
        flat += i * strides[k];
    }
    data.get(flat).copied()
}

#[inline]
fn advance<const N: usize>(index: &mut [usize; N], shape: &[usize; N]) {
    for k in (0..N).rev() {
        index[k] += 1;
        if index[k] < shape[k] {
            return;
        }
        index[k] = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tensor1(data: &[i32]) -> Result<Tensor<i32, 1>, TensorError> {
        Tensor::from_shape_slice([data.len()], data)
    }

    #[test]
    fn dilation_reflects_even_footprint() -> Result<(), MorphologyError> {
        let src = tensor1(&[0, 0, 1, 0, 0])?;
        let mut dst = src.clone();
        let footprint = Footprint::full([2])?;
        grey_dilation(&src, &mut dst, &footprint, BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[0, 1, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn erosion_even_footprint() -> Result<(), MorphologyError> {
        let src = tensor1(&[1, 1, 0, 1, 1])?;
        let mut dst = src.clone();
        let footprint = Footprint::full([2])?;
        grey_erosion(&src, &mut dst, &footprint, BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[1, 1, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn border_modes_at_edges() -> Result<(), MorphologyError> {
        let src = tensor1(&[5, 1, 2, 3])?;
        let footprint = Footprint::full([3])?;
        let mut dst = src.clone();

        grey_erosion(&src, &mut dst, &footprint, BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[1, 1, 1, 2]);

        grey_dilation(&src, &mut dst, &footprint, BorderMode::Constant(9))?;
        assert_eq!(dst.as_slice(), &[9, 5, 3, 9]);

        grey_dilation(&src, &mut dst, &footprint, BorderMode::Wrap)?;
        assert_eq!(dst.as_slice(), &[5, 5, 3, 5]);

        grey_erosion(&src, &mut dst, &footprint, BorderMode::Mirror)?;
        assert_eq!(dst.as_slice(), &[1, 1, 1, 2]);
        Ok(())
    }

    #[test]
    fn dilation_2d_cross() -> Result<(), MorphologyError> {
        #[rustfmt::skip]
        let src = Tensor::<u8, 2>::from_shape_vec([3, 3], vec![
            0, 0, 0,
            0, 7, 0,
            0, 0, 0,
        ])?;
        let mut dst = src.clone();
        grey_dilation(&src, &mut dst, &Footprint::connectivity(1), BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[0, 7, 0, 7, 7, 7, 0, 7, 0]);
        Ok(())
    }

    #[test]
    fn opening_and_closing() -> Result<(), MorphologyError> {
        let footprint = Footprint::full([3])?;

        let src = tensor1(&[0, 5, 0, 0, 3, 3, 3, 0])?;
        let mut dst = src.clone();
        grey_opening(&src, &mut dst, &footprint, BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[0, 0, 0, 0, 3, 3, 3, 0]);

        let src = tensor1(&[5, 5, 0, 5, 5])?;
        let mut dst = src.clone();
        grey_closing(&src, &mut dst, &footprint, BorderMode::Reflect)?;
        assert_eq!(dst.as_slice(), &[5, 5, 5, 5, 5]);
        Ok(())
    }

    #[test]
    fn shape_mismatch() -> Result<(), MorphologyError> {
        let src = Tensor::<f32, 2>::from_shape_val([2, 3], 0.0);
        let mut dst = Tensor::<f32, 2>::from_shape_val([3, 2], 0.0);
        let res = grey_erosion(&src, &mut dst, &Footprint::full([3, 3])?, BorderMode::Reflect);
        assert!(matches!(
            res,
            Err(MorphologyError::Tensor(TensorError::DimensionMismatch { .. }))
        ));
        Ok(())
    }

    #[test]
    fn empty_input() -> Result<(), MorphologyError> {
        let src = Tensor::<f32, 2>::from_shape_val([0, 3], 0.0);
        let mut dst = src.clone();
        grey_dilation(&src, &mut dst, &Footprint::full([3, 3])?, BorderMode::Reflect)?;
        assert!(dst.is_empty());
        Ok(())
    }
}
