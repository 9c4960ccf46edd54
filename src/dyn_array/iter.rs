use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ptr;
use core::slice;

use super::DynArr;
use super::raw::RawBuf;

/// An iterator that moves the values out of a `DynArr`.
///
/// Values that are never yielded are dropped with the iterator, then the
/// block is freed.
pub struct IntoIter<T> {
    buf:   RawBuf<T>,
    start: usize,
    end:   usize,
    _ph:   PhantomData<T>,
}

impl<T> IntoIter<T> {
    /// The values not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.slot(self.start), self.end - self.start) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        let ret = unsafe { ptr::read(self.buf.slot(self.start)) };
        self.start += 1;
        return Some(ret);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.end - self.start;
        return (left, Some(left));
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        return Some(unsafe { ptr::read(self.buf.slot(self.end)) });
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let left = ptr::slice_from_raw_parts_mut(self.buf.slot_mut(self.start), self.end - self.start);
        unsafe { ptr::drop_in_place(left) };
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.debug_tuple("IntoIter").field(&self.as_slice()).finish();
    }
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIterator for DynArr<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        // `self` owns nothing after this, so dropping it is a no-op.
        let (buf, len) = self.take_buf();
        return IntoIter {
            buf:   buf,
            start: 0,
            end:   len,
            _ph:   PhantomData,
        };
    }
}

impl<'a, T> IntoIterator for &'a DynArr<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.iter();
    }
}

impl<'a, T> IntoIterator for &'a mut DynArr<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        return self.iter_mut();
    }
}
