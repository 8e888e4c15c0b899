use morpha_tensor::{Tensor, TensorError};
use num_traits::ToPrimitive;

/// An error type for the render module.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The display scale is not a finite positive number.
    #[error("Display scale must be finite and positive, got {0}")]
    InvalidScale(f32),

    /// The scaled buffer would exceed [`MAX_OUTPUT_PIXELS`].
    #[error("Rendered buffer of {rows}x{cols} scaled by {scale} exceeds the pixel limit")]
    OutputTooLarge {
        /// Rows of the input array
        rows: usize,
        /// Columns of the input array
        cols: usize,
        /// The requested display scale
        scale: f32,
    },

    /// Error creating the output buffer.
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Upper bound on the number of pixels of a rendered buffer.
pub const MAX_OUTPUT_PIXELS: usize = 1 << 28;

/// Render a 2D array as an 8-bit grayscale display buffer.
///
/// Values are min-max normalized to `0..=255`; a constant array renders black.
/// The buffer is resized by `scale` with nearest-neighbor sampling so masks keep
/// their hard edges.
///
/// # Arguments
///
/// * `image` - The 2D array to render, indexed as `[row, col]`.
/// * `scale` - The display scale factor.
///
/// # Returns
///
/// The grayscale buffer of shape `[round(rows * scale), round(cols * scale)]`, or
/// [`RenderError::OutputTooLarge`] if it would hold more than [`MAX_OUTPUT_PIXELS`].
///
/// # Example
///
/// ```
/// use morpha_imgproc::render::render_grayscale;
/// use morpha_tensor::Tensor;
///
/// let mask = Tensor::<u8, 2>::from_shape_vec([1, 2], vec![0, 1]).unwrap();
/// let buffer = render_grayscale(&mask, 2.0).unwrap();
/// assert_eq!(buffer.shape, [2, 4]);
/// assert_eq!(buffer.as_slice(), &[0, 0, 255, 255, 0, 0, 255, 255]);
/// ```
pub fn render_grayscale<T>(image: &Tensor<T, 2>, scale: f32) -> Result<Tensor<u8, 2>, RenderError>
where
    T: Copy + ToPrimitive,
{
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidScale(scale));
    }

    let values: Vec<f64> = image
        .iter()
        .map(|v| v.to_f64().unwrap_or(f64::NAN))
        .collect();
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;

    let [rows, cols] = image.shape;
    let too_large = RenderError::OutputTooLarge { rows, cols, scale };
    let (Some(out_rows), Some(out_cols)) = (scaled_len(rows, scale), scaled_len(cols, scale))
    else {
        return Err(too_large);
    };
    match out_rows.checked_mul(out_cols) {
        Some(pixels) if pixels <= MAX_OUTPUT_PIXELS => {}
        _ => return Err(too_large),
    }

    let mut data = Vec::with_capacity(out_rows * out_cols);
    for r in 0..out_rows {
        let src_r = nearest(r, scale, rows);
        for c in 0..out_cols {
            let src_c = nearest(c, scale, cols);
            let v = values[src_r * cols + src_c];
            let gray = if range > 0.0 && v.is_finite() {
                ((v - lo) / range * 255.0).round() as u8
            } else {
                0
            };
            data.push(gray);
        }
    }

    Ok(Tensor::from_shape_vec([out_rows, out_cols], data)?)
}

// `None` when the scaled length does not fit in the pixel budget.
fn scaled_len(len: usize, scale: f32) -> Option<usize> {
    if len == 0 {
        return Some(0);
    }
    let scaled = (len as f64 * f64::from(scale)).round();
    if scaled > MAX_OUTPUT_PIXELS as f64 {
        return None;
    }
    Some((scaled as usize).max(1))
}

fn nearest(dst: usize, scale: f32, len: usize) -> usize {
    let src = ((dst as f32 + 0.5) / scale).floor() as usize;
    src.min(len - 1)
}
