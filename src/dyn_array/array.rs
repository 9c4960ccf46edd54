use core::cmp;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ops::Index;
use core::ops::IndexMut;
use core::ops::Range;
use core::ptr;
use core::slice;

use super::raw::RawBuf;
use crate::global;
use crate::types::DynArrErr;
use crate::types::DynArrResult;
use crate::types::ErrorReason;

/// A contiguous growable array.
///
/// `DynArr` owns a single block of slots. The first `len()` slots hold live
/// values, the rest are uninitialized. Every operation that needs memory
/// returns a `DynArrResult`, and when it returns an error the array is left
/// exactly as it was.
///
/// Element construction is the other way an operation can fail: `Default`,
/// `Clone` or a caller supplied closure may panic. The array cleans up any
/// partially built state before the panic leaves it, so no value is leaked,
/// dropped twice, or observed half built. See each method for what state is
/// left behind.
pub struct DynArr<T> {
    buf: RawBuf<T>,
    len: usize,
    _ph: PhantomData<T>,
}

unsafe impl<T: Send> Send for DynArr<T> {}
unsafe impl<T: Sync> Sync for DynArr<T> {}

impl<T> DynArr<T> {
    /// Creates an empty array. Nothing is allocated.
    pub const fn new() -> Self {
        return Self {
            buf: RawBuf::new(),
            len: 0,
            _ph: PhantomData,
        };
    }

    /// Creates an empty array with room for exactly `capacity` values.
    pub fn with_capacity(capacity: usize) -> DynArrResult<Self> {
        let buf = RawBuf::allocate(capacity)?;
        return Ok(Self {
            buf: buf,
            len: 0,
            _ph: PhantomData,
        });
    }

    /// Creates an array of `len` default values. The capacity is exactly
    /// `len`.
    pub fn with_len(len: usize) -> DynArrResult<Self>
    where
        T: Default,
    {
        let mut arr = Self::with_capacity(len)?;
        arr.resize_with(len, T::default)?;
        return Ok(arr);
    }

    /// Builds an array out of `source`'s storage. `source` is left empty
    /// with no capacity.
    pub fn take_from(source: &mut Self) -> Self {
        let (buf, len) = source.take_buf();
        return Self {
            buf: buf,
            len: len,
            _ph: PhantomData,
        };
    }

    #[inline]
    pub const fn len(&self) -> usize {
        return self.len;
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        return self.buf.capacity();
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Makes sure the array can hold at least `new_capacity` values.
    ///
    /// Does nothing if the capacity is already large enough. Otherwise a
    /// block of exactly `new_capacity` slots is allocated and the values are
    /// moved over. If the allocation fails the array is untouched.
    pub fn reserve(&mut self, new_capacity: usize) -> DynArrResult<()> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        let mut new_buf = RawBuf::allocate(new_capacity)?;
        unsafe { relocate(self.buf.slot(0), new_buf.slot_mut(0), self.len) };
        self.buf.swap(&mut new_buf);
        return Ok(());
    }

    /// Resizes the array to `new_len`, filling new slots with
    /// `T::default()`.
    ///
    /// See [`DynArr::resize_with`].
    pub fn resize(&mut self, new_len: usize) -> DynArrResult<()>
    where
        T: Default,
    {
        return self.resize_with(new_len, T::default);
    }

    /// Resizes the array to `new_len`.
    ///
    /// Shrinking drops the trailing values. Growing first reserves exactly
    /// `new_len` slots and then fills the new ones by calling `f`.
    ///
    /// If `f` panics, the values it already produced are dropped and the
    /// length goes back to what it was. The capacity stays grown.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> DynArrResult<()>
    where
        F: FnMut() -> T,
    {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return Ok(());
        }

        self.reserve(new_len)?;
        let mut fill = PartialFill::new(self.buf.slot_mut(len));
        for _ in len..new_len {
            unsafe { fill.write(f()) };
        }
        fill.finish();
        self.len = new_len;
        return Ok(());
    }

    /// Drops every value past `new_len`. The capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        let len = self.len;
        if new_len >= len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(self.buf.slot_mut(new_len), len - new_len);
        // Shorten first so a panicking destructor can't cause a double drop.
        self.len = new_len;
        unsafe { ptr::drop_in_place(tail) };
    }

    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn push_back(&mut self, value: T) -> DynArrResult<()> {
        self.emplace_back(|| value)?;
        return Ok(());
    }

    /// Appends the value produced by `f` and returns a reference to it.
    ///
    /// When the array is full the capacity doubles (an empty array gets one
    /// slot). The new value is built straight into its slot of the new
    /// block before the old values are moved across, so if `f` panics or the
    /// allocation fails the array is exactly as it was.
    pub fn emplace_back<F>(&mut self, f: F) -> DynArrResult<&mut T>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;

        if len == self.capacity() {
            let mut new_buf = RawBuf::allocate(self.grown_capacity()?)?;
            unsafe {
                ptr::write(new_buf.slot_mut(len), f());
                relocate(self.buf.slot(0), new_buf.slot_mut(0), len);
            }
            self.buf.swap(&mut new_buf);
        } else {
            unsafe { ptr::write(self.buf.slot_mut(len), f()) };
        }

        self.len = len + 1;
        return Ok(unsafe { &mut *self.buf.slot_mut(len) });
    }

    /// Drops the last value.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty.
    #[track_caller]
    pub fn pop_back(&mut self) {
        if self.len == 0 {
            empty_failed();
        }
        self.len -= 1;
        unsafe { ptr::drop_in_place(self.buf.slot_mut(self.len)) };
    }

    /// Removes the last value and returns it, or `None` if the array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let ret = unsafe { ptr::read(self.buf.slot(self.len)) };
        return Some(ret);
    }

    #[track_caller]
    pub fn insert(&mut self, index: usize, value: T) -> DynArrResult<usize> {
        return self.emplace(index, || value);
    }

    /// Inserts the value produced by `f` at `index`, shifting everything
    /// after it one slot to the right. Returns `index`.
    ///
    /// If the array is full the value is built at `index` of a new block of
    /// twice the capacity and the old values are moved in around it.
    /// Otherwise the value is built first and only then are the trailing
    /// values shifted over. Either way a panic in `f` or a failed allocation
    /// leaves the array as it was.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    #[track_caller]
    pub fn emplace<F>(&mut self, index: usize, f: F) -> DynArrResult<usize>
    where
        F: FnOnce() -> T,
    {
        let len = self.len;
        if index > len {
            insert_failed(index, len);
        }

        if len == self.capacity() {
            let mut new_buf = RawBuf::allocate(self.grown_capacity()?)?;
            unsafe {
                ptr::write(new_buf.slot_mut(index), f());
                relocate(self.buf.slot(0), new_buf.slot_mut(0), index);
                relocate(self.buf.slot(index), new_buf.slot_mut(index + 1), len - index);
            }
            self.buf.swap(&mut new_buf);
        } else if index == len {
            unsafe { ptr::write(self.buf.slot_mut(len), f()) };
        } else {
            let value = f();
            unsafe {
                let hole = self.buf.slot_mut(index);
                ptr::copy(hole, hole.add(1), len - index);
                ptr::write(hole, value);
            }
        }

        self.len = len + 1;
        return Ok(index);
    }

    /// Removes and drops the value at `index`, shifting everything after it
    /// one slot to the left. Returns `index`, which now holds the value that
    /// followed the removed one (or is `len()` if the last value was removed).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        return index;
    }

    /// Removes the value at `index` and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            remove_failed(index, len);
        }
        unsafe {
            let hole = self.buf.slot_mut(index);
            let ret = ptr::read(hole);
            ptr::copy(hole.add(1), hole, len - index - 1);
            self.len = len - 1;
            return ret;
        }
    }

    /// Exchanges the contents of two arrays without touching any value.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.buf.swap(&mut other.buf);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Move assignment. The arrays trade contents, so `source` ends up
    /// holding what `self` held before.
    #[inline]
    pub fn move_assign(&mut self, source: &mut Self) {
        self.swap(source);
    }

    /// Clones the array into a block of exactly `len()` slots.
    ///
    /// If a `clone` panics, the clones made so far are dropped and the block
    /// is freed.
    pub fn try_clone(&self) -> DynArrResult<Self>
    where
        T: Clone,
    {
        let mut buf = RawBuf::allocate(self.len)?;
        let mut fill = PartialFill::new(buf.slot_mut(0));
        for item in self.as_slice() {
            unsafe { fill.write(item.clone()) };
        }
        let len = fill.finish();
        return Ok(Self {
            buf: buf,
            len: len,
            _ph: PhantomData,
        });
    }

    /// Copy assignment.
    ///
    /// If `source` doesn't fit in the current capacity, a full clone is made
    /// and swapped in; any failure leaves `self` untouched.
    ///
    /// Otherwise the block is reused: values past `source.len()` are
    /// dropped, the shared prefix is assigned with `clone_from`, and the
    /// remaining values are cloned onto the end. A panic part way through
    /// leaves a valid array holding a mix of old and new values.
    pub fn try_clone_from(&mut self, source: &Self) -> DynArrResult<()>
    where
        T: Clone,
    {
        if source.len > self.capacity() {
            let mut copy = source.try_clone()?;
            self.swap(&mut copy);
            return Ok(());
        }

        self.truncate(source.len);
        let (head, tail) = source.as_slice().split_at(self.len);
        for (dst, src) in self.as_mut_slice().iter_mut().zip(head) {
            dst.clone_from(src);
        }
        for item in tail {
            let value = item.clone();
            unsafe { ptr::write(self.buf.slot_mut(self.len), value) };
            self.len += 1;
        }
        return Ok(());
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        return self.buf.as_ptr();
    }

    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        return self.buf.as_mut_ptr();
    }

    /// The `begin..end` pointers of the live values.
    ///
    /// Any operation that reallocates or shifts values invalidates them.
    #[inline]
    pub fn as_ptr_range(&self) -> Range<*const T> {
        return self.buf.slot(0)..self.buf.slot(self.len);
    }

    #[inline]
    pub fn as_mut_ptr_range(&mut self) -> Range<*mut T> {
        let len = self.len;
        return self.buf.slot_mut(0)..self.buf.slot_mut(len);
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        return self.as_slice().iter();
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        return self.as_mut_slice().iter_mut();
    }

    pub(super) fn take_buf(&mut self) -> (RawBuf<T>, usize) {
        let mut buf = RawBuf::new();
        buf.take_ownership_from(&mut self.buf);
        let len = mem::replace(&mut self.len, 0);
        return (buf, len);
    }

    fn grown_capacity(&self) -> DynArrResult<usize> {
        let cap = self.capacity();
        if cap == 0 {
            return Ok(1);
        }
        let Some(cap) = cap.checked_mul(2) else {
            return Err(DynArrErr::new(ErrorReason::CapacityOverflow));
        };
        return Ok(cap);
    }
}

/// Moves `count` values from `src` into the uninitialized slots at `dst`.
///
/// A Rust move is a bit copy that can neither fail nor run user code, so
/// relocation always moves and never needs to fall back to cloning. The
/// `src` slots count as uninitialized afterwards.
#[inline]
unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    unsafe { ptr::copy_nonoverlapping(src, dst, count) };
}

/// Tracks values written into consecutive uninitialized slots. If dropped
/// before `finish`, which only happens while unwinding, it drops them.
struct PartialFill<T> {
    start: *mut T,
    count: usize,
}

impl<T> PartialFill<T> {
    const fn new(start: *mut T) -> Self {
        return Self {
            start: start,
            count: 0,
        };
    }

    /// The slot after the last written one must be uninitialized and in
    /// bounds.
    unsafe fn write(&mut self, value: T) {
        unsafe { ptr::write(self.start.add(self.count), value) };
        self.count += 1;
    }

    fn finish(self) -> usize {
        let count = self.count;
        mem::forget(self);
        return count;
    }
}

impl<T> Drop for PartialFill<T> {
    fn drop(&mut self) {
        let written = ptr::slice_from_raw_parts_mut(self.start, self.count);
        unsafe { ptr::drop_in_place(written) };
    }
}

#[cold]
#[track_caller]
fn index_failed(index: usize, len: usize) -> ! {
    panic!("index (is {index}) should be < len (is {len})");
}

#[cold]
#[track_caller]
fn insert_failed(index: usize, len: usize) -> ! {
    panic!("insertion index (is {index}) should be <= len (is {len})");
}

#[cold]
#[track_caller]
fn remove_failed(index: usize, len: usize) -> ! {
    panic!("removal index (is {index}) should be < len (is {len})");
}

#[cold]
#[track_caller]
fn empty_failed() -> ! {
    panic!("pop_back called on an empty array");
}

impl<T> Drop for DynArr<T> {
    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(self.as_mut_slice()) };
    }
}

impl<T> Default for DynArr<T> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<T: Clone> Clone for DynArr<T> {
    fn clone(&self) -> Self {
        let Ok(arr) = self.try_clone() else {
            global::alloc_failed::<T>(self.len);
        };
        return arr;
    }

    fn clone_from(&mut self, source: &Self) {
        if self.try_clone_from(source).is_err() {
            global::alloc_failed::<T>(source.len);
        }
    }
}

impl<T> Index<usize> for DynArr<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        if index >= self.len {
            index_failed(index, self.len);
        }
        return unsafe { &*self.buf.slot(index) };
    }
}

impl<T> IndexMut<usize> for DynArr<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        if index >= self.len {
            index_failed(index, self.len);
        }
        return unsafe { &mut *self.buf.slot_mut(index) };
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_list().entries(self.iter()).finish();
    }
}

impl<T: PartialEq> PartialEq for DynArr<T> {
    fn eq(&self, other: &Self) -> bool {
        return self.as_slice() == other.as_slice();
    }
}

impl<T: Eq> Eq for DynArr<T> {}

impl<T: PartialEq> PartialEq<[T]> for DynArr<T> {
    fn eq(&self, other: &[T]) -> bool {
        return self.as_slice() == other;
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for DynArr<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        return self.as_slice() == other.as_slice();
    }
}

impl<T: PartialOrd> PartialOrd for DynArr<T> {
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> {
        return self.as_slice().partial_cmp(other.as_slice());
    }
}

impl<T> AsRef<[T]> for DynArr<T> {
    fn as_ref(&self) -> &[T] {
        return self.as_slice();
    }
}

impl<T> AsMut<[T]> for DynArr<T> {
    fn as_mut(&mut self) -> &mut [T] {
        return self.as_mut_slice();
    }
}
