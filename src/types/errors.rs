use core::error::Error;
use core::fmt;

/// This enum lets one figure out what kind of error occurred durning
/// a `DynArr` operation.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorReason {
    /// The requested capacity does not fit in a `usize` worth of bytes,
    /// or doubling the capacity overflowed.
    CapacityOverflow = 1,
    /// The byte size of the block is larger than `isize::MAX`.
    LayoutFailure,
    /// The global allocator could not provide the block.
    AllocFailure,
}

/// A type alias for `Result<T, DynArrErr>`
pub type DynArrResult<T> = Result<T, DynArrErr>;

/// This is used to indicate an error during a `DynArr` operation.
///
/// Whenever one of these is returned the array is left exactly as it
/// was before the call.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DynArrErr(ErrorReason);

impl DynArrErr {
    pub(crate) const fn new(reason: ErrorReason) -> Self {
        return Self(reason);
    }

    pub const fn reason(self) -> ErrorReason {
        return self.0;
    }
}

impl Error for DynArrErr {}

impl fmt::Display for DynArrErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ErrorReason::CapacityOverflow => f.write_str("Capacity overflowed."),
            ErrorReason::LayoutFailure => f.write_str("Failed to create layout."),
            ErrorReason::AllocFailure => f.write_str("An allocation failure occurred."),
        }
    }
}
