use sqd_fixed_binary::memory::TrackingAllocator;
use sqd_fixed_binary::{FixedSizeBinaryBuilder, SharedBuilder};
use std::sync::{Arc, Barrier};


#[test]
fn concurrent_release() {
    const HOLDERS: usize = 8;

    for _ in 0..20 {
        let alloc = TrackingAllocator::new();
        let shared = SharedBuilder::new(FixedSizeBinaryBuilder::with_allocator(alloc.clone(), 16, 100));
        shared.with(|b| {
            b.append(&[1; 16]);
            b.append_null();
        });

        let holders: Vec<_> = (0..HOLDERS - 1).map(|_| shared.retain()).collect();
        assert_eq!(shared.ref_count(), HOLDERS);

        let barrier = Arc::new(Barrier::new(HOLDERS));
        let handles: Vec<_> = std::iter::once(shared)
            .chain(holders)
            .map(|holder| {
                let barrier = barrier.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    holder.release();
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(alloc.allocated_bytes(), 0);
    }
}


#[test]
fn finish_through_shared_handle() {
    let shared = SharedBuilder::new(FixedSizeBinaryBuilder::new(2, 0));
    let writer = shared.retain();

    writer.with(|b| b.append_values(&[[1u8, 2], [3, 4]], &[]));
    writer.release();

    let array = shared.with(|b| b.finish());
    shared.release();

    assert_eq!(array.value(1), &[3, 4]);
}
