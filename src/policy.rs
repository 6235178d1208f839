//! The growth policy shared by every growing and shrinking operation.
//!
//! A [`VlVec`](crate::VlVec) never chooses its capacity anywhere else:
//! spilling to the heap, reallocating a heap buffer and returning to
//! inline storage are all decided by [`required_capacity`].

/// Inline threshold used when the const parameter of [`VlVec`](crate::VlVec) is omitted.
pub const DEFAULT_INLINE_CAPACITY: usize = 16;

/// Returns the capacity a vector of `len` elements should have.
///
/// - If `len + 1 <= inline_capacity`, the inline buffer is enough and
///   `inline_capacity` is returned.
/// - Otherwise the result is `3 * (len + 1) / 2`, a growth factor of 1.5
///   that always leaves room for one more element.
///
/// Returns `None` if the computation overflows `usize`.
///
/// # Examples
///
/// ```
/// # use vlvec::policy::required_capacity;
/// assert_eq!(required_capacity(0, 4), Some(4));
/// assert_eq!(required_capacity(3, 4), Some(4));
/// assert_eq!(required_capacity(4, 4), Some(7));
/// assert_eq!(required_capacity(5, 4), Some(9));
/// assert_eq!(required_capacity(usize::MAX, 4), None);
/// ```
#[inline]
pub const fn required_capacity(len: usize, inline_capacity: usize) -> Option<usize> {
    let Some(next) = len.checked_add(1) else {
        return None;
    };
    if next <= inline_capacity {
        return Some(inline_capacity);
    }
    match next.checked_mul(3) {
        Some(v) => Some(v / 2),
        None => None,
    }
}
