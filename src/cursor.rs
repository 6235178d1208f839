//! Random-access cursors over the active buffer of a [`VlVec`](crate::VlVec).
//!
//! A cursor is a position in `0..=len`, where `len` is the vector's length
//! when the cursor was created. Position `len` is the end position: it
//! compares equal to [`VlVec::end`](crate::VlVec::end) but has no element.
//!
//! Movement never leaves `0..=len`. Stepping past either end stays at that
//! end instead of wrapping around.
//!
//! Cursors borrow the vector, so the vector cannot migrate or reallocate its
//! storage while any cursor is alive.
//!
//! # Examples
//!
//! ```
//! # use vlvec::{VlVec, vlvec};
//! let vec: VlVec<i32, 4> = vlvec![10, 20, 30];
//!
//! let mut it = vec.begin();
//! assert_eq!(it.get(), Some(&10));
//!
//! it += 2;
//! assert_eq!(it[0], 30);
//! assert_eq!(it[-1], 20);
//!
//! it += 5; // clamps at the end
//! assert!(it == vec.end());
//! assert_eq!(it - vec.begin(), 3);
//! ```

use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Index, IndexMut, Sub, SubAssign},
    slice,
};

#[inline]
fn clamp_offset(index: usize, delta: isize, len: usize) -> usize {
    if delta >= 0 {
        index.saturating_add(delta.unsigned_abs()).min(len)
    } else {
        index.saturating_sub(delta.unsigned_abs())
    }
}

#[inline]
fn resolve(index: usize, delta: isize, len: usize) -> Option<usize> {
    let target = index.checked_add_signed(delta)?;
    (target < len).then_some(target)
}

#[cold]
#[track_caller]
fn offset_out_of_range(index: usize, delta: isize, len: usize) -> ! {
    panic!("cursor offset {delta} from position {index} is out of range for length {len}")
}

/// A shared random-access cursor.
///
/// Cursors are `Copy`; to walk the elements from the cursor to the end use
/// [`iter`](Cursor::iter).
pub struct Cursor<'a, T> {
    buf: &'a [T],
    index: usize,
}

impl<'a, T> Cursor<'a, T> {
    #[inline]
    pub(crate) fn new(buf: &'a [T], index: usize) -> Self {
        Self {
            index: index.min(buf.len()),
            buf,
        }
    }

    /// Returns the position of the cursor.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the length of the vector when the cursor was created.
    #[inline]
    pub const fn snapshot_len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.index == self.buf.len()
    }

    /// Returns the element at the cursor, or `None` at the end position.
    #[inline]
    pub fn get(&self) -> Option<&'a T> {
        self.buf.get(self.index)
    }

    /// Returns the element `delta` positions away from the cursor, if any.
    #[inline]
    pub fn peek(&self, delta: isize) -> Option<&'a T> {
        resolve(self.index, delta, self.buf.len()).map(|i| &self.buf[i])
    }

    /// Moves one position forward, staying put at the end position.
    #[inline]
    pub fn move_next(&mut self) {
        if self.index < self.buf.len() {
            self.index += 1;
        }
    }

    /// Moves one position back, staying put at position 0.
    #[inline]
    pub fn move_prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Returns the elements from the cursor to the end.
    #[inline]
    pub fn remaining(&self) -> &'a [T] {
        &self.buf[self.index..]
    }

    /// Iterates over the elements from the cursor to the end.
    ///
    /// The cursor itself does not move.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'a, T> {
        self.remaining().iter()
    }
}

impl<T> Clone for Cursor<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.buf.len())
            .finish()
    }
}

impl<T> PartialEq for Cursor<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> PartialOrd for Cursor<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Cursor<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> AddAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn add_assign(&mut self, delta: isize) {
        self.index = clamp_offset(self.index, delta, self.buf.len());
    }
}

impl<T> SubAssign<isize> for Cursor<'_, T> {
    #[inline]
    fn sub_assign(&mut self, delta: isize) {
        *self += delta.saturating_neg();
    }
}

impl<T> Add<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<T> Sub<isize> for Cursor<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<'a, T> Sub for Cursor<'a, T> {
    type Output = isize;

    /// Signed distance between two positions.
    #[inline]
    fn sub(self, other: Cursor<'a, T>) -> isize {
        self.index as isize - other.index as isize
    }
}

impl<T> Index<isize> for Cursor<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, delta: isize) -> &T {
        match resolve(self.index, delta, self.buf.len()) {
            Some(i) => &self.buf[i],
            None => offset_out_of_range(self.index, delta, self.buf.len()),
        }
    }
}

/// An exclusive random-access cursor.
///
/// Returned by [`VlVec::insert`](crate::VlVec::insert) and
/// [`VlVec::erase`](crate::VlVec::erase), and by
/// [`VlVec::begin_mut`](crate::VlVec::begin_mut).
///
/// # Examples
///
/// ```
/// # use vlvec::{VlVec, vlvec};
/// let mut vec: VlVec<i32, 4> = vlvec![1, 2, 3];
///
/// let mut it = vec.begin_mut();
/// it += 1;
/// if let Some(x) = it.get_mut() {
///     *x *= 10;
/// }
/// it[1] = 0;
///
/// assert_eq!(vec, [1, 20, 0]);
/// ```
pub struct CursorMut<'a, T> {
    buf: &'a mut [T],
    index: usize,
}

impl<'a, T> CursorMut<'a, T> {
    #[inline]
    pub(crate) fn new(buf: &'a mut [T], index: usize) -> Self {
        Self {
            index: index.min(buf.len()),
            buf,
        }
    }

    /// Returns the position of the cursor.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the length of the vector when the cursor was created.
    #[inline]
    pub const fn snapshot_len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the cursor is at the end position.
    #[inline]
    pub const fn is_end(&self) -> bool {
        self.index == self.buf.len()
    }

    #[inline]
    pub fn get(&self) -> Option<&T> {
        self.buf.get(self.index)
    }

    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.buf.get_mut(self.index)
    }

    /// Consumes the cursor, returning the element at it with the full borrow lifetime.
    #[inline]
    pub fn into_mut(self) -> Option<&'a mut T> {
        let Self { buf, index } = self;
        buf.get_mut(index)
    }

    #[inline]
    pub fn move_next(&mut self) {
        if self.index < self.buf.len() {
            self.index += 1;
        }
    }

    #[inline]
    pub fn move_prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Reborrows as a shared [`Cursor`] at the same position.
    #[inline]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.buf, self.index)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .field("len", &self.buf.len())
            .finish()
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T> PartialOrd for CursorMut<'_, T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for CursorMut<'_, T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Sub for &CursorMut<'_, T> {
    type Output = isize;

    /// Signed distance between two positions.
    #[inline]
    fn sub(self, other: Self) -> isize {
        self.index as isize - other.index as isize
    }
}

impl<T> AddAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn add_assign(&mut self, delta: isize) {
        self.index = clamp_offset(self.index, delta, self.buf.len());
    }
}

impl<T> SubAssign<isize> for CursorMut<'_, T> {
    #[inline]
    fn sub_assign(&mut self, delta: isize) {
        *self += delta.saturating_neg();
    }
}

impl<T> Add<isize> for CursorMut<'_, T> {
    type Output = Self;

    #[inline]
    fn add(mut self, delta: isize) -> Self {
        self += delta;
        self
    }
}

impl<T> Sub<isize> for CursorMut<'_, T> {
    type Output = Self;

    #[inline]
    fn sub(mut self, delta: isize) -> Self {
        self -= delta;
        self
    }
}

impl<T> Index<isize> for CursorMut<'_, T> {
    type Output = T;

    #[inline]
    #[track_caller]
    fn index(&self, delta: isize) -> &T {
        match resolve(self.index, delta, self.buf.len()) {
            Some(i) => &self.buf[i],
            None => offset_out_of_range(self.index, delta, self.buf.len()),
        }
    }
}

impl<T> IndexMut<isize> for CursorMut<'_, T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, delta: isize) -> &mut T {
        match resolve(self.index, delta, self.buf.len()) {
            Some(i) => &mut self.buf[i],
            None => offset_out_of_range(self.index, delta, self.buf.len()),
        }
    }
}
