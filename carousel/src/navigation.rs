//! Wraparound index arithmetic.
//!
//! Navigation past either end of the slide list loops to the opposite end.
//! The slide count is taken as a [`NonZeroUsize`], so an empty carousel can
//! never reach the modulo: callers check for slides first.

use std::num::NonZeroUsize;

/// Normalize any integer into `[0, len)` by circular wraparound
///
/// Equivalent to `((index % len) + len) % len`.
///
/// ```
/// use marquee_carousel::navigation::wrap;
/// use std::num::NonZeroUsize;
///
/// let five = NonZeroUsize::new(5).unwrap();
/// assert_eq!(wrap(-1, five), 4);
/// assert_eq!(wrap(7, five), 2);
/// assert_eq!(wrap(i64::MIN, five), 2);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // result is in [0, len)
pub const fn wrap(index: i64, len: NonZeroUsize) -> usize {
    (index as i128).rem_euclid(len.get() as i128) as usize
}

/// Move `delta` slides from `current`, wrapping around either end
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // result is in [0, len)
pub const fn step(current: usize, delta: i64, len: NonZeroUsize) -> usize {
    (current as i128 + delta as i128).rem_euclid(len.get() as i128) as usize
}

/// [`wrap`] for a plain slide count; `None` when there are no slides
#[must_use]
pub fn wrap_checked(index: i64, len: usize) -> Option<usize> {
    NonZeroUsize::new(len).map(|len| wrap(index, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(len: usize) -> NonZeroUsize {
        NonZeroUsize::new(len).unwrap_or(NonZeroUsize::MIN)
    }

    #[test]
    fn test_wrap_examples() {
        assert_eq!(wrap(-1, n(5)), 4);
        assert_eq!(wrap(7, n(5)), 2);
        assert_eq!(wrap(0, n(5)), 0);
        assert_eq!(wrap(5, n(5)), 0);
        assert_eq!(wrap(-5, n(5)), 0);
        assert_eq!(wrap(-6, n(5)), 4);
    }

    #[test]
    fn test_wrap_single_slide_is_always_zero() {
        for index in [-3, -1, 0, 1, 42] {
            assert_eq!(wrap(index, n(1)), 0);
        }
    }

    #[test]
    fn test_wrap_extremes() {
        assert_eq!(wrap(i64::MAX, n(4)), 3);
        assert_eq!(wrap(i64::MIN, n(4)), 0);
    }

    #[test]
    fn test_step_both_directions() {
        assert_eq!(step(0, -1, n(4)), 3);
        assert_eq!(step(3, 1, n(4)), 0);
        assert_eq!(step(1, 1, n(4)), 2);
        assert_eq!(step(usize::MAX, 1, n(2)), 0);
    }

    #[test]
    fn test_wrap_checked_empty() {
        assert_eq!(wrap_checked(3, 0), None);
        assert_eq!(wrap_checked(3, 2), Some(1));
    }
}
