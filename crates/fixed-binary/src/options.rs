use crate::builder::FixedSizeBinaryBuilder;
use crate::memory::AllocatorRef;
use serde::{Deserialize, Serialize};


#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BuilderOptions {
    pub byte_width: usize,
    /// Number of items to preallocate
    #[serde(default)]
    pub capacity: usize
}


impl BuilderOptions {
    pub fn new(byte_width: usize) -> Self {
        Self {
            byte_width,
            capacity: 0
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(&self) -> FixedSizeBinaryBuilder {
        FixedSizeBinaryBuilder::from_options(self)
    }

    pub fn build_with_allocator(&self, allocator: AllocatorRef) -> FixedSizeBinaryBuilder {
        FixedSizeBinaryBuilder::with_allocator(allocator, self.byte_width, self.capacity)
    }
}
