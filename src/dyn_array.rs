mod array;
mod iter;
mod raw;


pub use array::DynArr;
pub use iter::IntoIter;
