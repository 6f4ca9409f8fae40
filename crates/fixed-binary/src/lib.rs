mod access;
pub mod builder;
pub mod error;
pub mod json;
pub mod memory;
mod options;
pub mod slice;


pub use access::*;
pub use builder::{ArrayBuilder, FixedSizeBinaryBuilder, SharedBuilder};
pub use options::*;
