/// Border handling modes for N-dimensional filters.
///
/// Decides which sample is read when a neighborhood reaches outside the array.
/// Each variant documents the extension of the sequence `a b c d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode<T> {
    /// Reflect about the edge, repeating the edge sample.
    ///
    /// Example: ...d c b a | a b c d | d c b a...
    Reflect,

    /// Reflect about the center of the edge sample, which is not repeated.
    ///
    /// Example: ...d c b | a b c d | c b a...
    Mirror,

    /// Replicate the nearest edge sample.
    ///
    /// Example: ...a a a | a b c d | d d d...
    Nearest,

    /// Wrap around to the opposite edge.
    ///
    /// Example: ...b c d | a b c d | a b c...
    Wrap,

    /// Fill out-of-bounds samples with a constant value.
    ///
    /// Example: ...k k k | a b c d | k k k...
    Constant(T),
}

impl<T> BorderMode<T> {
    #[inline]
    fn reflect(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i - 1;
            } else {
                i = 2 * len - i - 1;
            }
        }
        i as usize
    }

    #[inline]
    fn mirror(i: isize, len: usize) -> usize {
        if len == 1 {
            return 0;
        }
        let len = len as isize;
        let mut i = i;
        while i < 0 || i >= len {
            if i < 0 {
                i = -i;
            } else {
                i = 2 * len - i - 2;
            }
        }
        i as usize
    }

    #[inline]
    fn wrap(i: isize, len: usize) -> usize {
        let len = len as isize;
        (((i % len) + len) % len) as usize
    }

    /// Maps a possibly out-of-range coordinate to a valid index in `[0, len)`.
    ///
    /// Offsets that overshoot by more than one axis length are folded repeatedly.
    /// Returns `None` when the coordinate falls outside the array under
    /// [`BorderMode::Constant`]; the caller then uses the fill value.
    ///
    /// `len` must be non-zero.
    ///
    /// # Example
    ///
    /// ```
    /// use morpha_imgproc::border::BorderMode;
    ///
    /// let mode = BorderMode::<u8>::Reflect;
    /// assert_eq!(mode.map_index(-1, 4), Some(0));
    /// assert_eq!(mode.map_index(5, 4), Some(2));
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }
        match self {
            BorderMode::Reflect => Some(Self::reflect(i, len)),
            BorderMode::Mirror => Some(Self::mirror(i, len)),
            BorderMode::Nearest => Some(i.clamp(0, len as isize - 1) as usize),
            BorderMode::Wrap => Some(Self::wrap(i, len)),
            BorderMode::Constant(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_repeats_edge() {
        let mode = BorderMode::<u8>::Reflect;
        assert_eq!(mode.map_index(-1, 4), Some(0));
        assert_eq!(mode.map_index(-2, 4), Some(1));
        assert_eq!(mode.map_index(4, 4), Some(3));
        assert_eq!(mode.map_index(5, 4), Some(2));
        // second fold
        assert_eq!(mode.map_index(-5, 4), Some(3));
        assert_eq!(mode.map_index(9, 4), Some(1));
        assert_eq!(mode.map_index(-3, 1), Some(0));
    }

    #[test]
    fn mirror_skips_edge() {
        let mode = BorderMode::<u8>::Mirror;
        assert_eq!(mode.map_index(-1, 4), Some(1));
        assert_eq!(mode.map_index(4, 4), Some(2));
        assert_eq!(mode.map_index(2, 1), Some(0));
    }

    #[test]
    fn nearest_wrap_constant() {
        assert_eq!(BorderMode::<u8>::Nearest.map_index(-3, 4), Some(0));
        assert_eq!(BorderMode::<u8>::Nearest.map_index(7, 4), Some(3));
        assert_eq!(BorderMode::<u8>::Wrap.map_index(-1, 4), Some(3));
        assert_eq!(BorderMode::<u8>::Wrap.map_index(9, 4), Some(1));
        assert_eq!(BorderMode::Constant(7u8).map_index(-1, 4), None);
        assert_eq!(BorderMode::Constant(7u8).map_index(2, 4), Some(2));
    }
}
