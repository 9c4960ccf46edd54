use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;

use crate::global;
use crate::types::DynArrErr;
use crate::types::DynArrResult;
use crate::types::ErrorReason;

const fn layout_array(layout: Layout, length: usize) -> DynArrResult<Layout> {
    let lay = layout.pad_to_align();
    let Some(len) = length.checked_mul(lay.size()) else {
        return Err(DynArrErr::new(ErrorReason::CapacityOverflow));
    };
    // Also rejects anything over isize::MAX.
    let Ok(lay) = Layout::from_size_align(len, layout.align()) else {
        return Err(DynArrErr::new(ErrorReason::LayoutFailure));
    };
    return Ok(lay);
}

/// An owned block of uninitialized slots for `capacity` values of `T`.
///
/// `RawBuf` never constructs or drops a `T`. Whatever lives in the slots is
/// the owner's business; dropping a `RawBuf` only gives the memory back.
///
/// When the block would be zero bytes (no slots, or a zero sized `T`) no
/// allocation is made and `ptr` is dangling, but `capacity` still records
/// the requested slot count.
pub(crate) struct RawBuf<T> {
    ptr:      NonNull<T>,
    capacity: usize,
}

impl<T> RawBuf<T> {
    const LAYOUT: Layout = Layout::new::<T>();

    pub(crate) const fn new() -> Self {
        return Self {
            ptr:      NonNull::dangling(),
            capacity: 0,
        };
    }

    pub(crate) fn allocate(capacity: usize) -> DynArrResult<Self> {
        let layout = layout_array(Self::LAYOUT, capacity)?;

        // Don't allocate anything in this case.
        if layout.size() == 0 {
            return Ok(Self {
                ptr:      NonNull::dangling(),
                capacity: capacity,
            });
        }

        let ptr = global::allocate(layout)?;
        return Ok(Self {
            ptr:      ptr.cast(),
            capacity: capacity,
        });
    }

    /// Gives the block back to the allocator and leaves `self` empty.
    /// Calling it again is a no-op.
    pub(crate) fn release(&mut self) {
        if let Some(layout) = self.block_layout() {
            unsafe { global::deallocate(self.ptr.cast(), layout) };
        }
        self.ptr = NonNull::dangling();
        self.capacity = 0;
    }

    fn block_layout(&self) -> Option<Layout> {
        // `allocate` already validated this capacity.
        let Ok(layout) = layout_array(Self::LAYOUT, self.capacity) else {
            return None;
        };
        if layout.size() == 0 {
            return None;
        }
        return Some(layout);
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        return self.capacity;
    }

    #[inline]
    pub(crate) const fn as_ptr(&self) -> *const T {
        return self.ptr.as_ptr();
    }

    #[inline]
    pub(crate) const fn as_mut_ptr(&mut self) -> *mut T {
        return self.ptr.as_ptr();
    }

    /// Pointer to slot `index`. One past the last slot is allowed so ranges
    /// can be expressed; anything further is a caller bug.
    #[inline]
    pub(crate) fn slot(&self, index: usize) -> *const T {
        debug_assert!(index <= self.capacity);
        return unsafe { self.as_ptr().add(index) };
    }

    #[inline]
    pub(crate) fn slot_mut(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        return unsafe { self.as_mut_ptr().add(index) };
    }

    /// Releases the current block and takes over `other`'s, leaving `other`
    /// empty.
    pub(crate) fn take_ownership_from(&mut self, other: &mut Self) {
        self.release();
        self.swap(other);
    }

    #[inline]
    pub(crate) fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}
