use std::alloc::{handle_alloc_error, Layout};
use std::panic::RefUnwindSafe;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;


/// Alignment of every region handed out by the allocators of this module.
///
/// Matches the alignment arrow uses for its own buffers.
pub const ALIGNMENT: usize = 64;


/// Memory source for builder buffers.
///
/// Callers never pass zero sizes. Regions returned by [Allocator::allocate]
/// and [Allocator::reallocate] must be aligned to [ALIGNMENT] and stay
/// valid until they are passed to [Allocator::free] or [Allocator::reallocate].
pub trait Allocator: Send + Sync + RefUnwindSafe {
    fn allocate(&self, size: usize) -> NonNull<u8>;

    /// # Safety
    ///
    /// `ptr` must come from this allocator and currently span `old_size` bytes.
    unsafe fn reallocate(&self, ptr: NonNull<u8>, old_size: usize, new_size: usize) -> NonNull<u8>;

    /// # Safety
    ///
    /// `ptr` must come from this allocator and currently span `size` bytes.
    unsafe fn free(&self, ptr: NonNull<u8>, size: usize);
}


pub type AllocatorRef = Arc<dyn Allocator>;


pub fn default_allocator() -> AllocatorRef {
    Arc::new(DefaultAllocator)
}


#[inline]
fn layout(size: usize) -> Layout {
    Layout::from_size_align(size, ALIGNMENT).expect("allocation size overflow")
}


/// Global heap allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAllocator;


impl Allocator for DefaultAllocator {
    fn allocate(&self, size: usize) -> NonNull<u8> {
        let layout = layout(size);
        // SAFETY: layout size is never zero
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout))
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old_size: usize, new_size: usize) -> NonNull<u8> {
        let ptr = std::alloc::realloc(ptr.as_ptr(), layout(old_size), new_size);
        NonNull::new(ptr).unwrap_or_else(|| handle_alloc_error(layout(new_size)))
    }

    unsafe fn free(&self, ptr: NonNull<u8>, size: usize) {
        std::alloc::dealloc(ptr.as_ptr(), layout(size))
    }
}


/// Heap allocator which keeps track of what it was asked to do.
///
/// Useful to check that capacity reservations actually prevent reallocation
/// and that every finished or released buffer gets returned.
#[derive(Debug, Default)]
pub struct TrackingAllocator {
    allocations: AtomicUsize,
    reallocations: AtomicUsize,
    frees: AtomicUsize,
    allocated_bytes: AtomicUsize
}


impl TrackingAllocator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn reallocations(&self) -> usize {
        self.reallocations.load(Ordering::SeqCst)
    }

    pub fn frees(&self) -> usize {
        self.frees.load(Ordering::SeqCst)
    }

    /// Number of storage mutations (allocations plus reallocations) so far
    pub fn mutations(&self) -> usize {
        self.allocations() + self.reallocations()
    }

    /// Bytes currently held by live regions
    pub fn allocated_bytes(&self) -> usize {
        self.allocated_bytes.load(Ordering::SeqCst)
    }
}


impl Allocator for TrackingAllocator {
    fn allocate(&self, size: usize) -> NonNull<u8> {
        let ptr = DefaultAllocator.allocate(size);
        self.allocations.fetch_add(1, Ordering::SeqCst);
        self.allocated_bytes.fetch_add(size, Ordering::SeqCst);
        ptr
    }

    unsafe fn reallocate(&self, ptr: NonNull<u8>, old_size: usize, new_size: usize) -> NonNull<u8> {
        let ptr = DefaultAllocator.reallocate(ptr, old_size, new_size);
        self.reallocations.fetch_add(1, Ordering::SeqCst);
        self.allocated_bytes.fetch_add(new_size, Ordering::SeqCst);
        self.allocated_bytes.fetch_sub(old_size, Ordering::SeqCst);
        ptr
    }

    unsafe fn free(&self, ptr: NonNull<u8>, size: usize) {
        DefaultAllocator.free(ptr, size);
        self.frees.fetch_add(1, Ordering::SeqCst);
        self.allocated_bytes.fetch_sub(size, Ordering::SeqCst);
    }
}
