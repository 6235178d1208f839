use alloc::vec::Vec;
use core::{
    fmt,
    iter::FusedIterator,
    mem::{ManuallyDrop, MaybeUninit},
    ptr, slice,
};

use crate::{error::Error, utils::cold_path};

/// The inline arm of a [`VlVec`](crate::VlVec): a fixed `[MaybeUninit<T>; N]`
/// buffer and the number of initialized elements at its front.
///
/// Slots at `len..N` are uninitialized. An element leaving the logical
/// sequence is dropped in place and its slot goes back to uninitialized.
pub(crate) struct InlineVec<T, const N: usize> {
    data: [MaybeUninit<T>; N],
    len: usize,
}

impl<T, const N: usize> Drop for InlineVec<T, N> {
    // Internal data using `MaybeUninit`, we need to call `drop` manually.
    fn drop(&mut self) {
        if self.len > 0 {
            // SAFETY: `0..len` is initialized.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
            }
        }
    }
}

impl<T, const N: usize> InlineVec<T, N> {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            data: [const { MaybeUninit::uninit() }; N],
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) const fn as_ptr(&self) -> *const T {
        &raw const self.data as *const T
    }

    #[inline(always)]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        &raw mut self.data as *mut T
    }

    /// # Safety
    /// - `new_len <= N`.
    /// - Growing requires the new elements to be initialized.
    /// - Shrinking requires the cut elements to be dropped or moved out.
    #[inline(always)]
    pub(crate) const unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= N);
        self.len = new_len
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn as_slice(&self) -> &[T] {
        // SAFETY: `0..len` is initialized.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub(crate) const fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `0..len` is initialized.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// # Safety
    /// `len < N` before the call.
    #[inline(always)]
    pub(crate) const unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < N);
        let len = self.len;
        unsafe {
            ptr::write(self.as_mut_ptr().add(len), value);
        }
        self.len = len + 1;
    }

    #[inline]
    pub(crate) const fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            cold_path();
            None
        } else {
            self.len -= 1;
            // SAFETY: the slot was initialized and is now outside `0..len`.
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        if self.len > len {
            let tail = self.len - len;
            // Shorten first so a panicking destructor cannot cause a double drop.
            self.len = len;
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                    self.as_mut_ptr().add(len),
                    tail,
                ))
            }
        }
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.truncate(0);
    }

    pub(crate) fn retain_mut<F: FnMut(&mut T) -> bool>(&mut self, mut f: F) {
        let len = self.len;
        // Leak instead of double dropping if `f` panics.
        self.len = 0;
        let mut kept = 0usize;
        let base_ptr = self.as_mut_ptr();
        for index in 0..len {
            unsafe {
                let cur = base_ptr.add(index);
                if f(&mut *cur) {
                    if index != kept {
                        ptr::copy_nonoverlapping(cur, base_ptr.add(kept), 1);
                    }
                    kept += 1;
                } else {
                    ptr::drop_in_place(cur);
                }
            }
        }
        self.len = kept;
    }

    /// Moves every element into a new [`Vec`] with room for exactly
    /// `capacity` elements, leaving `self` empty.
    ///
    /// The allocation happens before anything is moved, so on failure
    /// `self` is untouched.
    pub(crate) fn try_spill(&mut self, capacity: usize) -> Result<Vec<T>, Error> {
        debug_assert!(capacity >= self.len);
        let mut vec: Vec<T> = Vec::new();
        vec.try_reserve_exact(capacity)
            .map_err(|_| Error::AllocFailed { capacity })?;

        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr(), vec.as_mut_ptr(), self.len);
            vec.set_len(self.len);
            self.len = 0;
        }
        Ok(vec)
    }

    /// Moves the first `len` elements of `vec` into a new inline buffer and
    /// drops the rest, leaving `vec` empty.
    pub(crate) fn from_vec_truncate(vec: &mut Vec<T>) -> Self {
        let len = vec.len().min(N);
        let mut res = Self::new();
        unsafe {
            // Detach the elements first; the tail is dropped while `vec` is empty.
            let src = vec.as_mut_ptr();
            let total = vec.len();
            vec.set_len(0);
            ptr::copy_nonoverlapping(src, res.as_mut_ptr(), len);
            res.len = len;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(src.add(len), total - len));
        }
        res
    }
}

impl<T, const N: usize> Default for InlineVec<T, N> {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for InlineVec<T, N> {
    fn clone(&self) -> Self {
        let mut vec = Self::new();
        for item in self.as_slice() {
            // SAFETY: `self.len <= N`.
            unsafe { vec.push_unchecked(item.clone()) };
        }
        vec
    }
}

/// An iterator that consumes the inline arm and yields its items by value.
pub struct IntoIter<T, const N: usize> {
    vec: ManuallyDrop<InlineVec<T, N>>,
    index: usize,
}

impl<T, const N: usize> IntoIterator for InlineVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            vec: ManuallyDrop::new(self),
            index: 0,
        }
    }
}

impl<T, const N: usize> IntoIter<T, N> {
    pub fn as_slice(&self) -> &[T] {
        let len = self.vec.len - self.index;
        unsafe { slice::from_raw_parts(self.vec.as_ptr().add(self.index), len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        let len = self.vec.len - self.index;
        unsafe { slice::from_raw_parts_mut(self.vec.as_mut_ptr().add(self.index), len) }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.vec.len {
            self.index += 1;
            unsafe { Some(ptr::read(self.vec.as_ptr().add(self.index - 1))) }
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let v = self.vec.len - self.index;
        (v, Some(v))
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index < self.vec.len {
            self.vec.len -= 1;
            unsafe { Some(ptr::read(self.vec.as_ptr().add(self.vec.len))) }
        } else {
            None
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Drop for IntoIter<T, N> {
    fn drop(&mut self) {
        if self.index < self.vec.len {
            unsafe {
                ptr::drop_in_place(slice::from_raw_parts_mut(
                    self.vec.as_mut_ptr().add(self.index),
                    self.vec.len - self.index,
                ));
            }
        }
    }
}

impl<T, const N: usize> Default for IntoIter<T, N> {
    fn default() -> Self {
        InlineVec::new().into_iter()
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
