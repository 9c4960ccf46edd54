//! # Dynamic Array
//!
//! The `dyn_array` crate provides a `#[no_std]` growable array, `DynArr`, much like `std::Vec`,
//! built in two layers: a raw storage block that only knows how to hand out and take back
//! uninitialized slots, and the array itself, which is the only code that constructs and drops
//! values inside those slots.
//!
//! `DynArr` uses fallible allocations, meaning that instead of aborting on allocation failure,
//! it returns an error and leaves the array unchanged. The growth operations (`reserve`,
//! `push_back`, `emplace_back`, `insert`, `emplace`, growing `resize`) build any new value
//! directly in its final slot before moving the old values across, so a panic from `Default`,
//! `Clone` or a caller supplied closure leaves the array as it was.
//!
//! Capacity doubles when an append or insert finds the array full, starting at one slot.
//! `reserve` and `resize` allocate exactly what they are asked for.
//!
//! Misuse such as an out of range index or `pop_back` on an empty array panics.
//!
//! ```
//! use dyn_array::DynArr;
//!
//! let mut arr = DynArr::new();
//! arr.push_back(1).unwrap();
//! arr.push_back(2).unwrap();
//! arr.push_back(3).unwrap();
//! assert_eq!(arr, [1, 2, 3]);
//! assert_eq!(arr.capacity(), 4);
//!
//! arr.insert(1, 99).unwrap();
//! assert_eq!(arr, [1, 99, 2, 3]);
//! arr.erase(1);
//! assert_eq!(arr, [1, 2, 3]);
//!
//! arr.resize(1).unwrap();
//! assert_eq!(arr, [1]);
//! assert_eq!(arr.capacity(), 4);
//! ```

#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

mod dyn_array;
mod global;
pub mod types;

pub use dyn_array::DynArr;
pub use dyn_array::IntoIter;
