//! Thin wrapper around the global allocator.
//!
//! `alloc::alloc::alloc()` requires a non-zero layout size and reports
//! failure with a null pointer; this turns that into a `DynArrResult`.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::types::DynArrErr;
use crate::types::DynArrResult;
use crate::types::ErrorReason;

/// Allocates a block for `layout`. The layout size must be non-zero.
pub(crate) fn allocate(layout: Layout) -> DynArrResult<NonNull<u8>> {
    debug_assert!(layout.size() != 0);

    #[cfg(test)]
    if !budget::take() {
        return Err(DynArrErr::new(ErrorReason::AllocFailure));
    }

    let ptr = unsafe { alloc::alloc::alloc(layout) };
    let Some(ptr) = NonNull::new(ptr) else {
        return Err(DynArrErr::new(ErrorReason::AllocFailure));
    };
    return Ok(ptr);
}

/// Frees a block obtained from `allocate` with the same `layout`.
pub(crate) unsafe fn deallocate(ptr: NonNull<u8>, layout: Layout) {
    unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
}

/// Used by the infallible trait impls (`Clone`) that have no way to hand
/// an error back.
#[cold]
pub(crate) fn alloc_failed<T>(capacity: usize) -> ! {
    let layout = match Layout::array::<T>(capacity) {
        Ok(layout) => layout,
        Err(_) => Layout::new::<T>(),
    };
    alloc::alloc::handle_alloc_error(layout);
}
