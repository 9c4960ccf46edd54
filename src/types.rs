//! Error types returned by `DynArr` operations.
//!
//! Only memory problems are reported through these types. A panic raised
//! while constructing an element is not converted into an error; the array
//! cleans up after itself and lets the panic continue.

mod errors;

pub use errors::*;
