use alloc::{boxed::Box, vec::Vec};
use core::{fmt, iter::FusedIterator, mem, ptr};

use crate::{
    cursor::{Cursor, CursorMut},
    error::{Error, infallible},
    inline_vec::{self, InlineVec},
    policy::{self, DEFAULT_INLINE_CAPACITY},
    utils::trace_storage,
};

/// Where the elements of a [`VlVec`] currently live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// In the fixed buffer inside the `VlVec` value itself.
    Inline,
    /// In a separately owned heap buffer.
    Spilled,
}

enum Storage<T, const N: usize> {
    Inline(InlineVec<T, N>),
    /// `capacity` is the value the growth policy produced for this buffer.
    /// The allocation behind `buf` holds at least that many elements.
    Spilled { buf: Vec<T>, capacity: usize },
}

/// A vector stored inline while it holds at most `N` elements, and in an owned
/// heap buffer beyond that.
///
/// The storage mode is chosen by a single growth policy,
/// [`required_capacity`](policy::required_capacity):
///
/// - the vector spills to the heap at the push that makes `len == N + 1`,
///   with a capacity of `3 * (len + 1) / 2`,
/// - a spilled vector reallocates with the same formula when it runs out of room,
/// - after any removal, a spilled vector moves back inline once
///   `required_capacity(len) <= N`, i.e. once `len < N`.
///
/// Everything else behaves like [`Vec`], and the vector dereferences to a slice.
///
/// # Examples
///
/// ```
/// use vlvec::{Mode, VlVec};
///
/// let mut vec: VlVec<i32, 4> = VlVec::new();
/// vec.extend([1, 2, 3, 4]);
/// assert_eq!(vec.mode(), Mode::Inline);
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push(5);
/// assert_eq!(vec.mode(), Mode::Spilled);
/// assert_eq!(vec.capacity(), 9);
///
/// while vec.len() > 1 {
///     vec.pop();
/// }
/// assert_eq!(vec.mode(), Mode::Inline);
/// assert_eq!(vec.capacity(), 4);
/// assert_eq!(vec, [1]);
/// ```
pub struct VlVec<T, const N: usize = { DEFAULT_INLINE_CAPACITY }>(Storage<T, N>);

/// Creates a [`VlVec`] containing the arguments.
///
/// The syntax is similar to [`vec!`](https://doc.rust-lang.org/std/macro.vec.html).
/// Elements are pushed in order, so the storage mode follows the growth policy.
///
/// # Examples
///
/// ```
/// # use vlvec::{vlvec, VlVec};
/// let vec: VlVec<String, 10> = vlvec![];
/// let vec: VlVec<i64, 10> = vlvec![1; 5];
/// let vec: VlVec<_, 2> = vlvec![1, 2, 3, 4];
/// assert!(vec.spilled());
/// ```
#[macro_export]
macro_rules! vlvec {
    [] => { $crate::VlVec::new() };
    [$elem:expr; $n:expr] => { $crate::VlVec::from_elem($elem, $n) };
    [$($item:expr),+ $(,)?] => { $crate::VlVec::from([ $($item),+ ]) };
}

impl<T, const N: usize> VlVec<T, N> {
    /// Constructs a new, empty `VlVec` in inline mode.
    ///
    /// No heap memory is allocated. The inline buffer is part of the value,
    /// so `N` should stay small enough for the stack.
    #[inline]
    pub const fn new() -> Self {
        Self(Storage::Inline(InlineVec::new()))
    }

    /// Returns the capacity the growth policy assigns to `len` elements with
    /// this vector's inline threshold.
    ///
    /// # Panics
    ///
    /// Panics if the result overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::VlVec;
    /// assert_eq!(VlVec::<u8, 4>::required_capacity(3), 4);
    /// assert_eq!(VlVec::<u8, 4>::required_capacity(5), 9);
    /// ```
    #[inline]
    pub const fn required_capacity(len: usize) -> usize {
        match policy::required_capacity(len, N) {
            Some(capacity) => capacity,
            None => panic!("capacity overflow"),
        }
    }

    /// Returns the inline threshold `N`.
    #[inline(always)]
    pub const fn inline_capacity(&self) -> usize {
        N
    }

    #[inline(always)]
    pub const fn mode(&self) -> Mode {
        match &self.0 {
            Storage::Inline(_) => Mode::Inline,
            Storage::Spilled { .. } => Mode::Spilled,
        }
    }

    /// Returns `true` if the elements live on the heap.
    #[inline(always)]
    pub const fn spilled(&self) -> bool {
        matches!(self.0, Storage::Spilled { .. })
    }

    /// Returns the number of elements in the vector.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.0 {
            Storage::Inline(vec) => vec.len(),
            Storage::Spilled { buf, .. } => buf.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements the vector can hold before it must
    /// move its storage.
    ///
    /// This is `N` in inline mode, and the last value chosen by the growth
    /// policy in spilled mode. It is never below `N`.
    #[inline]
    pub const fn capacity(&self) -> usize {
        match &self.0 {
            Storage::Inline(_) => N,
            Storage::Spilled { capacity, .. } => *capacity,
        }
    }

    /// Returns a raw pointer to the active buffer.
    ///
    /// The pointer is invalidated by any operation that changes the storage mode
    /// or reallocates.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        match &self.0 {
            Storage::Inline(vec) => vec.as_ptr(),
            Storage::Spilled { buf, .. } => buf.as_ptr(),
        }
    }

    /// Returns a raw mutable pointer to the active buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        match &mut self.0 {
            Storage::Inline(vec) => vec.as_mut_ptr(),
            Storage::Spilled { buf, .. } => buf.as_mut_ptr(),
        }
    }

    /// Extracts a slice of the live elements, wherever they are stored.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.0 {
            Storage::Inline(vec) => vec.as_slice(),
            Storage::Spilled { buf, .. } => buf.as_slice(),
        }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.0 {
            Storage::Inline(vec) => vec.as_mut_slice(),
            Storage::Spilled { buf, .. } => buf.as_mut_slice(),
        }
    }

    /// # Safety
    /// `new_len <= capacity()`, with the usual [`Vec::set_len`] requirements.
    #[inline]
    unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        unsafe {
            match &mut self.0 {
                Storage::Inline(vec) => vec.set_len(new_len),
                Storage::Spilled { buf, .. } => buf.set_len(new_len),
            }
        }
    }

    /// Makes room for `new_len` elements, moving the storage if needed.
    ///
    /// The new buffer is fully populated before it replaces the old one, so
    /// an allocation failure leaves the vector untouched.
    fn try_ensure_capacity_for(&mut self, new_len: usize) -> Result<(), Error> {
        if new_len <= self.capacity() {
            return Ok(());
        }
        let capacity = policy::required_capacity(new_len, N).ok_or(Error::CapacityOverflow)?;

        match &mut self.0 {
            Storage::Inline(vec) => {
                let buf = vec.try_spill(capacity)?;
                trace_storage!(len = buf.len(), capacity, "spilled inline buffer to the heap");
                self.0 = Storage::Spilled { buf, capacity };
            }
            Storage::Spilled {
                buf,
                capacity: current,
            } => {
                let mut new_buf: Vec<T> = Vec::new();
                new_buf
                    .try_reserve_exact(capacity)
                    .map_err(|_| Error::AllocFailed { capacity })?;
                new_buf.append(buf);
                trace_storage!(
                    len = new_buf.len(),
                    from = *current,
                    to = capacity,
                    "reallocated heap buffer"
                );
                *buf = new_buf;
                *current = capacity;
            }
        }
        Ok(())
    }

    #[inline]
    fn ensure_capacity_for(&mut self, new_len: usize) {
        if new_len > self.capacity() {
            infallible::<T, _>(self.try_ensure_capacity_for(new_len));
        }
    }

    /// Moves a spilled vector back inline once the growth policy allows it.
    fn shrink_if_eligible(&mut self) {
        if let Storage::Spilled { buf, .. } = &mut self.0 {
            let fits = matches!(policy::required_capacity(buf.len(), N), Some(c) if c <= N);
            if fits {
                trace_storage!(len = buf.len(), "moved heap buffer back inline");
                self.0 = Storage::Inline(InlineVec::from_vec_truncate(buf));
            }
        }
    }

    /// Reserves room for `additional` more elements, following the growth policy.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::VlVec;
    /// let mut vec: VlVec<i32, 8> = VlVec::new();
    /// vec.reserve(5);
    /// assert!(!vec.spilled());
    ///
    /// vec.reserve(10);
    /// assert!(vec.spilled());
    /// assert_eq!(vec.capacity(), VlVec::<i32, 8>::required_capacity(10));
    /// ```
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        infallible::<T, _>(self.try_reserve(additional));
    }

    /// Fallible version of [`reserve`](VlVec::reserve).
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let new_len = self
            .len()
            .checked_add(additional)
            .ok_or(Error::CapacityOverflow)?;
        self.try_ensure_capacity_for(new_len)
    }

    /// Returns a reference to the element at `index`, or
    /// [`Error::OutOfRange`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vlvec::{vlvec, Error, VlVec};
    /// let vec: VlVec<char, 4> = vlvec!['a', 'b'];
    /// assert_eq!(vec.at(1), Ok(&'b'));
    /// assert_eq!(vec.at(2), Err(Error::OutOfRange { index: 2, len: 2 }));
    /// ```
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len();
        self.as_slice()
            .get(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Mutable version of [`at`](VlVec::at).
    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len();
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Appends an element to the back of the vector.
    ///
    /// Spills to the heap, or reallocates, when the current capacity is used up.
    ///
    /// # Time complexity
    /// Amortized O(1).
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 2> = vlvec![1, 2];
    /// vec.push(3);
    /// assert_eq!(vec, [1, 2, 3]);
    /// assert!(vec.spilled());
    /// ```
    #[inline]
    pub fn push(&mut self, value: T) {
        let len = self.len();
        self.ensure_capacity_for(len + 1);
        // SAFETY: len < capacity.
        unsafe {
            ptr::write(self.as_mut_ptr().add(len), value);
            self.set_len(len + 1);
        }
    }

    /// Fallible version of [`push`](VlVec::push).
    ///
    /// On error the vector is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), Error> {
        let len = self.len();
        let new_len = len.checked_add(1).ok_or(Error::CapacityOverflow)?;
        self.try_ensure_capacity_for(new_len)?;
        // SAFETY: len < capacity.
        unsafe {
            ptr::write(self.as_mut_ptr().add(len), value);
            self.set_len(new_len);
        }
        Ok(())
    }

    /// Removes the last element and returns it, or `None` if the vector is empty.
    ///
    /// A spilled vector may move back inline afterwards.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 2, 3];
    /// assert_eq!(vec.pop(), Some(3));
    /// assert_eq!(vec, [1, 2]);
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let value = match &mut self.0 {
            Storage::Inline(vec) => vec.pop(),
            Storage::Spilled { buf, .. } => buf.pop(),
        }?;
        self.shrink_if_eligible();
        Some(value)
    }

    /// Inserts an element at `index`, shifting everything after it to the
    /// right, and returns a cursor at the new element.
    ///
    /// The storage grows before anything is shifted. `index == len` is the
    /// same as [`push`](VlVec::push).
    ///
    /// # Panics
    /// Panics if `index > len`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 2, 3];
    ///
    /// let it = vec.insert(1, 99);
    /// assert_eq!(it.index(), 1);
    /// assert_eq!(it.get(), Some(&99));
    /// assert_eq!(vec, [1, 99, 2, 3]);
    ///
    /// vec.insert(4, 4);
    /// assert!(vec.spilled());
    /// ```
    #[inline]
    pub fn insert(&mut self, index: usize, element: T) -> CursorMut<'_, T> {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        self.ensure_capacity_for(len + 1);
        // SAFETY: index <= len < capacity.
        unsafe { self.shift_in(index, element, len) };
        self.cursor_mut(index)
    }

    /// Fallible version of [`insert`](VlVec::insert).
    ///
    /// # Panics
    /// Panics if `index > len`.
    pub fn try_insert(&mut self, index: usize, element: T) -> Result<CursorMut<'_, T>, Error> {
        let len = self.len();
        assert!(index <= len, "insertion index (is {index}) should be <= len (is {len})");
        let new_len = len.checked_add(1).ok_or(Error::CapacityOverflow)?;
        self.try_ensure_capacity_for(new_len)?;
        // SAFETY: index <= len < capacity.
        unsafe { self.shift_in(index, element, len) };
        Ok(self.cursor_mut(index))
    }

    /// # Safety
    /// `index <= len` and `len < capacity()`.
    #[inline(always)]
    unsafe fn shift_in(&mut self, index: usize, element: T, len: usize) {
        unsafe {
            let slot = self.as_mut_ptr().add(index);
            ptr::copy(slot, slot.add(1), len - index);
            ptr::write(slot, element);
            self.set_len(len + 1);
        }
    }

    /// Removes and returns the element at `index`, shifting everything after it
    /// to the left.
    ///
    /// A spilled vector may move back inline afterwards.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut v: VlVec<_, 4> = vlvec!['a', 'b', 'c'];
    /// assert_eq!(v.remove(1), 'b');
    /// assert_eq!(v, ['a', 'c']);
    /// ```
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "removal index (is {index}) should be < len (is {len})");
        // SAFETY: index < len, the tail is moved down over the read slot.
        let value = unsafe {
            let slot = self.as_mut_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, len - index - 1);
            self.set_len(len - 1);
            value
        };
        self.shrink_if_eligible();
        value
    }

    /// Drops the element at `index`, shifting everything after it to the left,
    /// and returns a cursor at the element that now occupies `index`
    /// (the end position if the last element was erased).
    ///
    /// # Panics
    /// Panics if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut v: VlVec<_, 4> = vlvec![10, 20, 30];
    /// let it = v.erase(0);
    /// assert_eq!(it.get(), Some(&20));
    /// assert_eq!(v, [20, 30]);
    ///
    /// assert!(v.erase(1).is_end());
    /// ```
    pub fn erase(&mut self, index: usize) -> CursorMut<'_, T> {
        drop(self.remove(index));
        self.cursor_mut(index)
    }

    /// Removes an element and returns it, replacing it with the last element.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        let len = self.len();
        assert!(index < len, "swap_remove index (is {index}) should be < len (is {len})");
        self.as_mut_slice().swap(index, len - 1);
        // Cannot be `None`: len > 0.
        match self.pop() {
            Some(value) => value,
            None => unreachable!(),
        }
    }

    /// Keeps the first `len` elements and drops the rest.
    ///
    /// Has no effect if `len >= self.len()`. A spilled vector may move back
    /// inline afterwards.
    pub fn truncate(&mut self, len: usize) {
        match &mut self.0 {
            Storage::Inline(vec) => vec.truncate(len),
            Storage::Spilled { buf, .. } => buf.truncate(len),
        }
        self.shrink_if_eligible();
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 2> = vlvec![1, 2, 3, 4];
    /// vec.retain(|x| *x % 2 == 0);
    /// assert_eq!(vec, [2, 4]);
    ///
    /// vec.retain(|x| *x > 2);
    /// assert_eq!(vec, [4]);
    /// assert!(!vec.spilled());
    /// ```
    #[inline]
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.retain_mut(|v| f(v));
    }

    /// Retains only the elements specified by the predicate, passing a mutable reference to it.
    pub fn retain_mut<F: FnMut(&mut T) -> bool>(&mut self, f: F) {
        match &mut self.0 {
            Storage::Inline(vec) => vec.retain_mut(f),
            Storage::Spilled { buf, .. } => buf.retain_mut(f),
        }
        self.shrink_if_eligible();
    }

    /// Removes all elements.
    ///
    /// A spilled vector releases its heap buffer and returns to inline mode.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 4> = vlvec![1, 2, 3, 4, 5];
    /// assert!(vec.spilled());
    /// vec.clear();
    /// assert!(vec.is_empty());
    /// assert!(!vec.spilled());
    /// assert_eq!(vec.capacity(), 4);
    /// ```
    pub fn clear(&mut self) {
        match &mut self.0 {
            Storage::Inline(vec) => vec.clear(),
            Storage::Spilled { .. } => {
                trace_storage!(capacity = self.capacity(), "released heap buffer on clear");
                self.0 = Storage::Inline(InlineVec::new());
            }
        }
    }

    /// Returns a cursor at the first element.
    #[inline]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Returns a cursor at the end position, one past the last element.
    #[inline]
    pub fn end(&self) -> Cursor<'_, T> {
        let len = self.len();
        Cursor::new(self.as_slice(), len)
    }

    /// Returns a cursor at `index`, clamped to the end position.
    #[inline]
    pub fn cursor(&self, index: usize) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), index)
    }

    #[inline]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    #[inline]
    pub fn end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len();
        CursorMut::new(self.as_mut_slice(), len)
    }

    /// Returns a mutable cursor at `index`, clamped to the end position.
    #[inline]
    pub fn cursor_mut(&mut self, index: usize) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), index)
    }

    /// Converts into a [`Vec`].
    ///
    /// Inline data is copied into an exact allocation; spilled data is
    /// returned without reallocating.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        match self.0 {
            Storage::Inline(vec) => vec.into_iter().collect(),
            Storage::Spilled { buf, .. } => buf,
        }
    }

    #[inline]
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.into_vec().into_boxed_slice()
    }
}

impl<T: Clone, const N: usize> VlVec<T, N> {
    /// Creates a `VlVec` with `num` copies of `elem`.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::VlVec;
    /// let vec: VlVec<i32, 5> = VlVec::from_elem(1, 4);
    /// assert_eq!(vec, [1, 1, 1, 1]);
    /// assert!(!vec.spilled());
    /// ```
    pub fn from_elem(elem: T, num: usize) -> Self {
        let mut vec = Self::new();
        vec.reserve(num);
        if num > 0 {
            for _ in 1..num {
                vec.push(elem.clone());
            }
            // Reduce one copy.
            vec.push(elem);
        }
        vec
    }

    /// Clones and appends all elements in a slice.
    ///
    /// # Examples
    /// ```
    /// # use vlvec::{vlvec, VlVec};
    /// let mut vec: VlVec<_, 5> = vlvec![1];
    /// vec.extend_from_slice(&[2, 3, 4]);
    /// assert_eq!(vec, [1, 2, 3, 4]);
    /// ```
    pub fn extend_from_slice(&mut self, other: &[T]) {
        self.reserve(other.len());
        for item in other {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> Default for VlVec<T, N> {
    /// Same as [`VlVec::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, const N: usize> Clone for VlVec<T, N> {
    /// Clones the live elements into the same storage mode with the same capacity.
    fn clone(&self) -> Self {
        match &self.0 {
            Storage::Inline(vec) => Self(Storage::Inline(vec.clone())),
            Storage::Spilled { buf, capacity } => {
                let mut new_buf = Vec::with_capacity(*capacity);
                new_buf.extend_from_slice(buf);
                Self(Storage::Spilled {
                    buf: new_buf,
                    capacity: *capacity,
                })
            }
        }
    }

    /// Builds the copy first, then swaps it in.
    ///
    /// If cloning an element panics, `self` keeps its previous contents.
    fn clone_from(&mut self, source: &Self) {
        let mut tmp = source.clone();
        mem::swap(self, &mut tmp);
    }
}

crate::utils::impl_slice_traits!(VlVec<T, N>);

impl<T, U, const N: usize, const M: usize> PartialEq<VlVec<U, M>> for VlVec<T, N>
where
    T: PartialEq<U>,
{
    /// Element-wise comparison. The storage mode is not part of equality.
    #[inline]
    fn eq(&self, other: &VlVec<U, M>) -> bool {
        PartialEq::eq(self.as_slice(), other.as_slice())
    }
}

impl<T, const N: usize> Extend<T> for VlVec<T, N> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<'a, T: 'a + Clone, const N: usize> Extend<&'a T> for VlVec<T, N> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item.clone());
        }
    }
}

impl<T, const N: usize> FromIterator<T> for VlVec<T, N> {
    /// Pushes every item in order, so the storage crosses the inline threshold
    /// exactly as repeated [`push`](VlVec::push) calls would.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vec = Self::new();
        vec.extend(iter);
        vec
    }
}

impl<T, const N: usize, const P: usize> From<[T; P]> for VlVec<T, N> {
    fn from(value: [T; P]) -> Self {
        value.into_iter().collect()
    }
}

impl<T: Clone, const N: usize> From<&[T]> for VlVec<T, N> {
    fn from(value: &[T]) -> Self {
        value.iter().cloned().collect()
    }
}

impl<T, const N: usize> From<Vec<T>> for VlVec<T, N> {
    /// Moves inline when `len <= N`; otherwise keeps the allocation and takes
    /// `required_capacity(len)` as the capacity.
    fn from(mut value: Vec<T>) -> Self {
        let len = value.len();
        if len <= N {
            Self(Storage::Inline(InlineVec::from_vec_truncate(&mut value)))
        } else {
            let capacity = Self::required_capacity(len);
            value.reserve_exact(capacity - len);
            Self(Storage::Spilled {
                buf: value,
                capacity,
            })
        }
    }
}

impl<T, const N: usize> From<VlVec<T, N>> for Vec<T> {
    #[inline]
    fn from(value: VlVec<T, N>) -> Self {
        value.into_vec()
    }
}

impl<T, const N: usize> IntoIterator for VlVec<T, N> {
    type Item = T;
    type IntoIter = IntoIter<T, N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        match self.0 {
            Storage::Inline(vec) => IntoIter(IntoIterInner::Inline(vec.into_iter())),
            Storage::Spilled { buf, .. } => IntoIter(IntoIterInner::Spilled(buf.into_iter())),
        }
    }
}

/// An iterator that consumes a [`VlVec`] and yields its items by value.
pub struct IntoIter<T, const N: usize>(IntoIterInner<T, N>);

enum IntoIterInner<T, const N: usize> {
    Inline(inline_vec::IntoIter<T, N>),
    Spilled(alloc::vec::IntoIter<T>),
}

impl<T, const N: usize> IntoIter<T, N> {
    /// Returns the remaining items as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match &self.0 {
            IntoIterInner::Inline(iter) => iter.as_slice(),
            IntoIterInner::Spilled(iter) => iter.as_slice(),
        }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match &mut self.0 {
            IntoIterInner::Inline(iter) => iter.as_mut_slice(),
            IntoIterInner::Spilled(iter) => iter.as_mut_slice(),
        }
    }
}

impl<T, const N: usize> Iterator for IntoIter<T, N> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        match &mut self.0 {
            IntoIterInner::Inline(iter) => iter.next(),
            IntoIterInner::Spilled(iter) => iter.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            IntoIterInner::Inline(iter) => iter.size_hint(),
            IntoIterInner::Spilled(iter) => iter.size_hint(),
        }
    }
}

impl<T, const N: usize> DoubleEndedIterator for IntoIter<T, N> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        match &mut self.0 {
            IntoIterInner::Inline(iter) => iter.next_back(),
            IntoIterInner::Spilled(iter) => iter.next_back(),
        }
    }
}

impl<T, const N: usize> ExactSizeIterator for IntoIter<T, N> {}

impl<T, const N: usize> FusedIterator for IntoIter<T, N> {}

impl<T, const N: usize> Default for IntoIter<T, N> {
    fn default() -> Self {
        Self(IntoIterInner::Inline(inline_vec::IntoIter::default()))
    }
}

impl<T: fmt::Debug, const N: usize> fmt::Debug for IntoIter<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
