use crate::builder::bitmask::BitmaskBuilder;
use crate::memory::AllocatorRef;
use crate::slice::NullmaskSlice;
use arrow_buffer::NullBuffer;


/// Validity bitmask together with a running null count.
pub struct NullmaskBuilder {
    nulls: BitmaskBuilder,
    null_count: usize
}


impl NullmaskBuilder {
    pub fn new(allocator: AllocatorRef, capacity: usize) -> Self {
        Self {
            nulls: BitmaskBuilder::new(allocator, capacity),
            null_count: 0
        }
    }

    pub fn byte_size(&self) -> usize {
        self.nulls.bytes_size()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    pub fn capacity(&self) -> usize {
        self.nulls.capacity()
    }

    pub fn clear(&mut self) {
        self.nulls.clear();
        self.null_count = 0
    }

    /// Sets the capacity to `bits` items. Items past `bits` are dropped.
    pub fn set_capacity(&mut self, bits: usize) {
        if bits < self.len() {
            self.null_count -= self.nulls.count_unset(bits..self.len());
        }
        self.nulls.set_capacity(bits)
    }

    #[inline]
    pub fn append(&mut self, val: bool) {
        self.nulls.append(val);
        if !val {
            self.null_count += 1
        }
    }

    pub fn append_many(&mut self, val: bool, count: usize) {
        self.nulls.append_many(val, count);
        if !val {
            self.null_count += count
        }
    }

    pub fn append_bools(&mut self, values: &[bool]) {
        self.nulls.append_bools(values);
        self.null_count += values.iter().filter(|valid| !**valid).count()
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        self.nulls.get(i)
    }

    pub fn finish(self) -> Option<NullBuffer> {
        if self.null_count == 0 {
            return None;
        }
        let null_count = self.null_count;
        let bitmask = self.nulls.finish();
        // SAFETY: `null_count` is kept in sync with the mask on every mutation
        Some(unsafe { NullBuffer::new_unchecked(bitmask, null_count) })
    }

    pub fn as_slice(&self) -> NullmaskSlice<'_> {
        NullmaskSlice::new(
            self.nulls.len(),
            (self.null_count > 0).then(|| self.nulls.as_slice())
        )
    }
}
