use alloc::alloc::{Layout, handle_alloc_error};
use core::fmt;

/// Error returned by the checked accessors and the fallible growth methods of
/// [`VlVec`](crate::VlVec).
///
/// A failed operation leaves the vector exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A checked access asked for `index` in a vector of `len` elements.
    OutOfRange { index: usize, len: usize },
    /// The growth policy overflowed `usize`.
    CapacityOverflow,
    /// The heap buffer of `capacity` elements could not be allocated.
    AllocFailed { capacity: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Error::CapacityOverflow => f.write_str("capacity overflow"),
            Error::AllocFailed { capacity } => {
                write!(f, "failed to allocate a buffer of {capacity} elements")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Unwraps the result of a fallible growth, diverging the same way [`Vec`](alloc::vec::Vec) does.
#[inline]
pub(crate) fn infallible<T, R>(result: Result<R, Error>) -> R {
    match result {
        Ok(x) => x,
        Err(Error::AllocFailed { capacity }) => match Layout::array::<T>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        Err(Error::CapacityOverflow) => panic!("capacity overflow"),
        Err(err @ Error::OutOfRange { .. }) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn display_messages() {
        let err = Error::OutOfRange { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of range for length 3");
        assert_eq!(Error::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            Error::AllocFailed { capacity: 9 }.to_string(),
            "failed to allocate a buffer of 9 elements"
        );
    }

    #[test]
    fn infallible_passes_values_through() {
        assert_eq!(infallible::<u8, _>(Ok(5)), 5);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn infallible_panics_on_overflow() {
        infallible::<u8, ()>(Err(Error::CapacityOverflow));
    }
}
