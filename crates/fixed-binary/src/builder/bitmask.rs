use crate::builder::buffer::RawBuffer;
use crate::memory::AllocatorRef;
use crate::slice::BitmaskSlice;
use arrow_buffer::{bit_util, BooleanBuffer};
use std::ops::Range;


/// Growable bit-per-item storage.
///
/// Bits past `len` are always kept cleared.
pub struct BitmaskBuilder {
    buffer: RawBuffer,
    len: usize,
}


impl BitmaskBuilder {
    pub fn new(allocator: AllocatorRef, capacity: usize) -> Self {
        Self {
            buffer: RawBuffer::with_capacity(allocator, bit_util::ceil(capacity, 8)),
            len: 0
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn bytes_size(&self) -> usize {
        bit_util::ceil(self.len, 8)
    }

    /// Number of bits the storage can hold without reallocation
    pub fn capacity(&self) -> usize {
        self.buffer.capacity() * 8
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.len = 0
    }

    /// Sets the storage size to exactly `ceil(bits / 8)` bytes,
    /// truncating the mask when `bits < len`.
    pub fn set_capacity(&mut self, bits: usize) {
        self.truncate(bits);
        self.buffer.set_capacity(bit_util::ceil(bits, 8))
    }

    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.buffer.truncate(bit_util::ceil(len, 8));
        let remainder = len % 8;
        if remainder != 0 {
            if let Some(last) = self.buffer.as_slice_mut().last_mut() {
                *last &= (1 << remainder) - 1
            }
        }
        self.len = len
    }

    #[inline]
    fn resize(&mut self, additional: usize) {
        let new_byte_len = bit_util::ceil(self.len + additional, 8);
        if new_byte_len > self.buffer.len() {
            self.buffer.resize(new_byte_len, 0)
        }
    }

    #[inline]
    pub fn append(&mut self, val: bool) {
        self.resize(1);
        if val {
            bit_util::set_bit(self.buffer.as_slice_mut(), self.len)
        }
        self.len += 1
    }

    pub fn append_many(&mut self, val: bool, count: usize) {
        let new_len = self.len + count;
        let new_len_bytes = bit_util::ceil(new_len, 8);
        if val {
            let cur_remainder = self.len % 8;
            let new_remainder = new_len % 8;

            if cur_remainder != 0 {
                // Pad last byte with 1s
                if let Some(last) = self.buffer.as_slice_mut().last_mut() {
                    *last |= !((1 << cur_remainder) - 1)
                }
            }

            self.buffer.truncate(bit_util::ceil(self.len, 8));
            self.buffer.resize(new_len_bytes, 0xFF);

            if new_remainder != 0 {
                // Clear remaining bits
                if let Some(last) = self.buffer.as_slice_mut().last_mut() {
                    *last &= (1 << new_remainder) - 1
                }
            }
        } else if new_len_bytes > self.buffer.len() {
            self.buffer.resize(new_len_bytes, 0);
        }
        self.len = new_len;
    }

    pub fn append_bools(&mut self, values: &[bool]) {
        self.resize(values.len());
        let data = self.buffer.as_slice_mut();
        for (i, &val) in values.iter().enumerate() {
            if val {
                bit_util::set_bit(data, self.len + i)
            }
        }
        self.len += values.len()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len);
        bit_util::get_bit(self.buffer.as_slice(), i)
    }

    pub fn count_unset(&self, range: Range<usize>) -> usize {
        assert!(range.end <= self.len);
        let data = self.buffer.as_slice();
        range.filter(|&i| !bit_util::get_bit(data, i)).count()
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn as_slice(&self) -> BitmaskSlice<'_> {
        BitmaskSlice::new(self.data(), 0, self.len)
    }

    pub fn finish(self) -> BooleanBuffer {
        BooleanBuffer::new(self.buffer.into_buffer(), 0, self.len)
    }
}
