mod bitmask;
mod fixed_size_binary;
mod nullmask;


pub use bitmask::*;
pub use fixed_size_binary::*;
pub use nullmask::*;


pub trait AsSlice {
    type Slice<'a>: Clone where Self: 'a;

    fn as_slice(&self) -> Self::Slice<'_>;
}
