use arrow::array::ArrayRef;
use arrow::datatypes::DataType;


pub mod bitmask;
pub mod buffer;
mod fixed_size_binary;
pub mod nullmask;
mod shared;


pub use fixed_size_binary::*;
pub use shared::*;


pub trait ArrayBuilder {
    fn data_type(&self) -> DataType;

    fn len(&self) -> usize;

    fn byte_size(&self) -> usize;

    fn clear(&mut self);

    /// Moves accumulated items into an array, leaving the builder empty
    fn finish(&mut self) -> ArrayRef;
}
