use crate::memory::{AllocatorRef, ALIGNMENT};
use arrow_buffer::{Buffer, MutableBuffer};
use std::ptr::NonNull;
use std::sync::Arc;


/// Growable byte region served by an [crate::memory::Allocator].
///
/// Unlike [MutableBuffer], capacity changes are exact and go through the
/// builder's allocator, and the region can be handed over to arrow without a copy.
pub struct RawBuffer {
    ptr: NonNull<u8>,
    len: usize,
    capacity: usize,
    allocator: AllocatorRef
}


// SAFETY: RawBuffer exclusively owns its region, the allocator is Send + Sync
unsafe impl Send for RawBuffer {}
unsafe impl Sync for RawBuffer {}


#[inline]
fn dangling() -> NonNull<u8> {
    // SAFETY: ALIGNMENT is not zero
    unsafe { NonNull::new_unchecked(ALIGNMENT as *mut u8) }
}


impl RawBuffer {
    pub fn new(allocator: AllocatorRef) -> Self {
        Self {
            ptr: dangling(),
            len: 0,
            capacity: 0,
            allocator
        }
    }

    pub fn with_capacity(allocator: AllocatorRef, capacity: usize) -> Self {
        let mut buf = Self::new(allocator);
        buf.set_capacity(capacity);
        buf
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn allocator(&self) -> &AllocatorRef {
        &self.allocator
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: first `len` bytes are initialized
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_slice_mut(&mut self) -> &mut [u8] {
        // SAFETY: first `len` bytes are initialized
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Sets the capacity to exactly `capacity` bytes.
    ///
    /// Content beyond the new capacity is dropped.
    pub fn set_capacity(&mut self, capacity: usize) {
        if capacity == self.capacity {
            return;
        }
        self.ptr = match (self.capacity, capacity) {
            (0, new) => self.allocator.allocate(new),
            (old, 0) => {
                unsafe { self.allocator.free(self.ptr, old) };
                dangling()
            },
            (old, new) => unsafe {
                self.allocator.reallocate(self.ptr, old, new)
            }
        };
        self.capacity = capacity;
        self.len = std::cmp::min(self.len, capacity);
    }

    /// Makes room for at least `additional` more bytes.
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len + additional;
        if required > self.capacity {
            let new_capacity = std::cmp::max(required, self.capacity * 2);
            self.set_capacity(new_capacity)
        }
    }

    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.reserve(data.len());
        // SAFETY: capacity was checked above, regions can't overlap
        unsafe {
            std::ptr::copy_nonoverlapping(
                data.as_ptr(),
                self.ptr.as_ptr().add(self.len),
                data.len()
            )
        }
        self.len += data.len()
    }

    /// Advances the length by `count` zeroed bytes
    pub fn extend_zeros(&mut self, count: usize) {
        self.resize(self.len + count, 0)
    }

    pub fn resize(&mut self, new_len: usize, value: u8) {
        if new_len > self.len {
            self.reserve(new_len - self.len);
            // SAFETY: capacity was checked above
            unsafe {
                std::ptr::write_bytes(
                    self.ptr.as_ptr().add(self.len),
                    value,
                    new_len - self.len
                )
            }
        }
        self.len = new_len
    }

    pub fn truncate(&mut self, len: usize) {
        self.len = std::cmp::min(self.len, len)
    }

    pub fn clear(&mut self) {
        self.len = 0
    }

    /// Hands the initialized part of the region over to arrow.
    ///
    /// The region is returned to the allocator once the last clone
    /// of the resulting buffer goes away.
    pub fn into_buffer(self) -> Buffer {
        if self.capacity == 0 {
            return MutableBuffer::new(0).into();
        }
        let this = std::mem::ManuallyDrop::new(self);
        let len = this.len;
        let owner = Region {
            ptr: this.ptr,
            size: this.capacity,
            // SAFETY: `this` is never dropped, so the allocator ref is moved out exactly once
            allocator: unsafe { std::ptr::read(&this.allocator) }
        };
        let ptr = owner.ptr;
        // SAFETY: `len` bytes at `ptr` are initialized and live as long as the owner
        unsafe {
            Buffer::from_custom_allocation(ptr, len, Arc::new(owner))
        }
    }
}


impl Drop for RawBuffer {
    fn drop(&mut self) {
        if self.capacity > 0 {
            unsafe { self.allocator.free(self.ptr, self.capacity) }
        }
    }
}


struct Region {
    ptr: NonNull<u8>,
    size: usize,
    allocator: AllocatorRef
}


// SAFETY: the region is immutable once transferred to arrow
unsafe impl Send for Region {}
unsafe impl Sync for Region {}


impl Drop for Region {
    fn drop(&mut self) {
        unsafe { self.allocator.free(self.ptr, self.size) }
    }
}
