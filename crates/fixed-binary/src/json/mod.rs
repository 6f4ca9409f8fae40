//! JSON text form of fixed size binary arrays.
//!
//! An array is a JSON list, where every item is either `null`,
//! an unpadded standard base64 string or a list of byte values.

mod decode;
mod encode;
mod token;


pub use encode::*;
pub use token::*;
