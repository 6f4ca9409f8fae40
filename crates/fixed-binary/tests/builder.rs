use arrow::array::{Array, FixedSizeBinaryBuilder as ArrowFixedSizeBinaryBuilder};
use arrow::datatypes::DataType;
use proptest::prelude::*;
use sqd_fixed_binary::error::{InvalidWidth, LengthMismatch};
use sqd_fixed_binary::memory::TrackingAllocator;
use sqd_fixed_binary::{ArrayBuilder, FixedSizeBinaryBuilder};
use std::panic::{catch_unwind, AssertUnwindSafe};


#[test]
fn append_and_null() {
    let mut builder = FixedSizeBinaryBuilder::new(3, 0);
    builder.append(&[1, 2, 3]);
    builder.append_null();
    builder.append(&[4, 5, 6]);

    assert_eq!(builder.len(), 3);
    assert_eq!(builder.null_count(), 1);

    let array = builder.finish();
    assert_eq!(array.len(), 3);
    assert_eq!(array.null_count(), 1);
    assert_eq!(array.value_length(), 3);
    assert_eq!(array.value(0), &[1, 2, 3]);
    assert!(array.is_null(1));
    assert_eq!(array.value(2), &[4, 5, 6]);
}


#[test]
fn append_values_with_validity() {
    let mut builder = FixedSizeBinaryBuilder::new(3, 0);
    builder.append_values(&[[1u8, 2, 3], [4, 5, 6]], &[true, false]);

    let array = builder.finish();
    assert_eq!(array.len(), 2);
    assert_eq!(array.null_count(), 1);
    assert!(array.is_valid(0));
    assert_eq!(array.value(0), &[1, 2, 3]);
    assert!(array.is_null(1));
}


#[test]
fn empty_placeholder_can_be_valid() {
    let mut builder = FixedSizeBinaryBuilder::new(2, 0);
    let values: [&[u8]; 3] = [&[1, 1], &[], &[3, 3]];
    builder.append_values(&values, &[true, true, false]);

    assert_eq!(builder.len(), 3);
    assert_eq!(builder.null_count(), 1);
    assert!(builder.value(1).is_some());

    builder.append_values(&values, &[]);
    assert_eq!(builder.len(), 6);
    assert_eq!(builder.null_count(), 1);
}


#[test]
fn empty_batch_is_noop() {
    let mut builder = FixedSizeBinaryBuilder::new(2, 0);
    let values: [&[u8]; 0] = [];
    builder.append_values(&values, &[]);
    assert_eq!(builder.len(), 0);
    assert_eq!(builder.capacity(), 0);
}


#[test]
fn invalid_width_leaves_length_unchanged() {
    let mut builder = FixedSizeBinaryBuilder::new(3, 0);
    builder.append(&[0, 0, 0]);

    let err = builder.try_append(&[1, 2]).unwrap_err();
    assert_eq!(err, InvalidWidth { expected: 3, actual: 2 });
    assert_eq!(builder.len(), 1);

    let result = catch_unwind(AssertUnwindSafe(|| builder.append(&[1, 2])));
    assert!(result.is_err());
    assert_eq!(builder.len(), 1);
    assert_eq!(builder.null_count(), 0);
}


#[test]
#[should_panic(expected = "invalid binary length (got=2, want=3)")]
fn invalid_width_panics() {
    let mut builder = FixedSizeBinaryBuilder::new(3, 0);
    builder.append(&[1, 2]);
}


#[test]
fn invalid_batch_is_rejected_as_whole() {
    let mut builder = FixedSizeBinaryBuilder::new(2, 0);
    let values: [&[u8]; 3] = [&[1, 1], &[2], &[3, 3]];

    let err = builder.try_append_values(&values, &[]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<InvalidWidth>(),
        Some(&InvalidWidth { expected: 2, actual: 1 })
    );

    let err = builder.try_append_values(&values, &[true]).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LengthMismatch>(),
        Some(&LengthMismatch { values: 3, valid: 1 })
    );

    assert_eq!(builder.len(), 0);
}


#[test]
#[should_panic(expected = "does not match the number of values")]
fn length_mismatch_panics() {
    let mut builder = FixedSizeBinaryBuilder::new(1, 0);
    builder.append_values(&[[1u8], [2]], &[true, false, true]);
}


#[test]
fn reserve_prevents_reallocation() {
    let alloc = TrackingAllocator::new();
    let mut builder = FixedSizeBinaryBuilder::with_allocator(alloc.clone(), 8, 0);
    builder.append(&[0; 8]);

    builder.reserve(1000);
    let mutations = alloc.mutations();

    for i in 0..1000u64 {
        if i % 7 == 0 {
            builder.append_null()
        } else {
            builder.append(&i.to_le_bytes())
        }
    }

    assert_eq!(alloc.mutations(), mutations);
    assert_eq!(builder.len(), 1001);
    assert_eq!(builder.null_count(), 143);
}


#[test]
fn finish_resets_builder() {
    let alloc = TrackingAllocator::new();
    let mut builder = FixedSizeBinaryBuilder::with_allocator(alloc.clone(), 2, 0);
    builder.append(&[1, 1]);
    builder.append_null();

    let first = builder.finish();
    assert_eq!(builder.len(), 0);
    assert_eq!(builder.null_count(), 0);
    assert_eq!(builder.capacity(), 0);

    builder.append(&[2, 2]);
    let second = builder.finish();

    assert_eq!(first.len(), 2);
    assert_eq!(first.null_count(), 1);
    assert_eq!(first.value(0), &[1, 1]);
    assert_eq!(second.len(), 1);
    assert_eq!(second.null_count(), 0);
    assert_eq!(second.value(0), &[2, 2]);

    drop(builder);
    assert!(alloc.allocated_bytes() > 0);

    drop(first);
    drop(second);
    assert_eq!(alloc.allocated_bytes(), 0);
}


#[test]
fn finished_array_is_shared() {
    let alloc = TrackingAllocator::new();
    let mut builder = FixedSizeBinaryBuilder::with_allocator(alloc.clone(), 4, 0);
    builder.append(b"abcd");
    builder.append_null();

    let array = ArrayBuilder::finish(&mut builder);
    let consumers: Vec<_> = (0..4).map(|_| array.clone()).collect();
    drop(array);
    drop(builder);

    let handles: Vec<_> = consumers.into_iter().map(|array| {
        std::thread::spawn(move || {
            assert_eq!(array.len(), 2);
            assert_eq!(array.null_count(), 1);
        })
    }).collect();

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(alloc.allocated_bytes(), 0);
}


#[test]
fn byte_size_follows_appends() {
    let mut builder = FixedSizeBinaryBuilder::new(4, 0);
    assert_eq!(builder.data_type(), DataType::FixedSizeBinary(4));
    assert_eq!(builder.byte_size(), 0);

    builder.append(b"abcd");
    builder.append_null();
    builder.append(b"efgh");
    assert_eq!(builder.byte_size(), 12 + 1);

    builder.append_values(&[b"ijkl"; 6], &[]);
    assert_eq!(builder.byte_size(), 36 + 2);

    let array = ArrayBuilder::finish(&mut builder);
    assert_eq!(array.data_type(), &DataType::FixedSizeBinary(4));
    assert_eq!(array.len(), 9);
    assert_eq!(builder.byte_size(), 0);
}


#[derive(Debug, Clone)]
enum Op {
    Append(Vec<u8>),
    Null,
    Values(Vec<Option<Vec<u8>>>, bool)
}


fn arb_ops(width: usize) -> impl Strategy<Value = Vec<Op>> {
    let item = prop::collection::vec(any::<u8>(), width);
    let op = prop_oneof![
        item.clone().prop_map(Op::Append),
        Just(Op::Null),
        (prop::collection::vec(prop::option::of(item), 0..20), any::<bool>())
            .prop_map(|(items, with_validity)| Op::Values(items, with_validity))
    ];
    prop::collection::vec(op, 0..100)
}


proptest! {
    #[test]
    fn matches_arrow_builder(ops in arb_ops(5)) {
        let mut builder = FixedSizeBinaryBuilder::new(5, 0);
        let mut reference = ArrowFixedSizeBinaryBuilder::new(5);

        for op in ops.iter() {
            match op {
                Op::Append(val) => {
                    builder.append(val);
                    reference.append_value(val).unwrap();
                },
                Op::Null => {
                    builder.append_null();
                    reference.append_null();
                },
                Op::Values(items, true) => {
                    let values: Vec<&[u8]> = items.iter()
                        .map(|item| item.as_deref().unwrap_or(&[]))
                        .collect();
                    let valid: Vec<bool> = items.iter().map(|item| item.is_some()).collect();
                    builder.append_values(&values, &valid);
                    for item in items.iter() {
                        match item {
                            Some(val) => reference.append_value(val).unwrap(),
                            None => reference.append_null()
                        }
                    }
                },
                Op::Values(items, false) => {
                    let values: Vec<&[u8]> = items.iter()
                        .flat_map(|item| item.as_deref())
                        .collect();
                    builder.append_values(&values, &[]);
                    for val in values.iter() {
                        reference.append_value(val).unwrap();
                    }
                }
            }
            prop_assert!(builder.capacity() >= builder.len());
        }

        let expected = reference.finish();
        prop_assert_eq!(builder.len(), expected.len());
        prop_assert_eq!(builder.null_count(), expected.null_count());

        let result = builder.finish();
        prop_assert_eq!(result.to_data(), expected.to_data());
    }
}
