//! ## Intro
//!
//! A vector that keeps small collections inside the value itself and spills
//! to an owned heap buffer once they outgrow a compile-time threshold.
//!
//! Similar to [`SmallVec`], but the capacity is driven by one explicit growth
//! policy, and a spilled vector moves back inline on its own when enough
//! elements are removed.
//!
//! ```
//! use vlvec::{vlvec, Mode, VlVec};
//!
//! let mut vec: VlVec<i32, 4> = vlvec![1, 2, 3];
//! assert_eq!(vec.mode(), Mode::Inline);
//!
//! vec.extend([4, 5]);
//! assert_eq!(vec.mode(), Mode::Spilled);
//! assert_eq!(vec.capacity(), 9);
//!
//! vec.truncate(2);
//! assert_eq!(vec.mode(), Mode::Inline);
//! assert_eq!(vec, [1, 2]);
//! ```
//!
//! ## Growth policy
//!
//! With an inline threshold `N`, the capacity needed for `len` elements is
//!
//! | `len`        | capacity              |
//! |--------------|-----------------------|
//! | `len < N`    | `N`                   |
//! | `len >= N`   | `3 * (len + 1) / 2`   |
//!
//! A push that would exceed the current capacity moves the elements into a
//! buffer of `required_capacity(len + 1)`. After every removal a spilled
//! vector checks `required_capacity(len) <= N` and, if so, moves back inline.
//! See [`policy::required_capacity`].
//!
//! ## Cursors
//!
//! [`Cursor`] and [`CursorMut`] are positions into the live elements with
//! signed, clamped arithmetic. They borrow the vector, so any operation that
//! could move the storage ends them at compile time.
//!
//! ```
//! # use vlvec::{vlvec, VlVec};
//! let vec: VlVec<char, 8> = vlvec!['a', 'b', 'c'];
//! let mut it = vec.begin();
//! it += 1;
//! assert_eq!(it[0], 'b');
//! assert_eq!(vec.end() - it, 2);
//! ```
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! ### `tracing`
//!
//! Emits [`tracing`] TRACE events whenever the storage moves: spilling to the
//! heap, reallocating, moving back inline and releasing the heap buffer on
//! [`clear`](VlVec::clear).
//!
//! [`SmallVec`]: https://docs.rs/smallvec/latest/smallvec
//! [`tracing`]: https://docs.rs/tracing
#![no_std]

extern crate alloc;

mod inline_vec;
mod utils;

pub mod cursor;
pub mod error;
pub mod policy;
pub mod vl_vec;

#[doc(inline)]
pub use cursor::{Cursor, CursorMut};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use policy::DEFAULT_INLINE_CAPACITY;
#[doc(inline)]
pub use vl_vec::{Mode, VlVec};
