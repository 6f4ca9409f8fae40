use crate::builder::buffer::RawBuffer;
use crate::builder::nullmask::NullmaskBuilder;
use crate::builder::ArrayBuilder;
use crate::error::{InvalidWidth, LengthMismatch};
use crate::memory::{default_allocator, AllocatorRef};
use crate::options::BuilderOptions;
use crate::slice::{AsSlice, FixedSizeBinarySlice};
use arrow::array::{ArrayRef, FixedSizeBinaryArray};
use arrow::datatypes::DataType;
use std::sync::Arc;
use tracing::{debug, trace};


const MIN_CAPACITY: usize = 32;


/// Append-only builder of [FixedSizeBinaryArray].
///
/// Every item occupies exactly `size` bytes in the value buffer,
/// null slots included (those are zero-filled).
pub struct FixedSizeBinaryBuilder {
    size: usize,
    capacity: usize,
    nulls: NullmaskBuilder,
    values: RawBuffer,
}


impl FixedSizeBinaryBuilder {
    pub fn new(size: usize, item_capacity: usize) -> Self {
        Self::with_allocator(default_allocator(), size, item_capacity)
    }

    pub fn with_allocator(allocator: AllocatorRef, size: usize, item_capacity: usize) -> Self {
        assert!(size > 0, "byte width must be positive");
        assert!(size <= i32::MAX as usize, "byte width {} is too large", size);
        let mut builder = Self {
            size,
            capacity: 0,
            nulls: NullmaskBuilder::new(allocator.clone(), 0),
            values: RawBuffer::new(allocator)
        };
        if item_capacity > 0 {
            builder.resize(item_capacity)
        }
        builder
    }

    pub fn from_options(options: &BuilderOptions) -> Self {
        Self::new(options.byte_width, options.capacity)
    }

    #[inline]
    pub fn byte_width(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn null_count(&self) -> usize {
        self.nulls.null_count()
    }

    /// Number of items the builder can hold without reallocation
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn allocator(&self) -> &AllocatorRef {
        self.values.allocator()
    }

    #[inline]
    fn check_width(&self, val: &[u8]) -> Result<(), InvalidWidth> {
        if val.len() == self.size {
            Ok(())
        } else {
            Err(InvalidWidth {
                expected: self.size,
                actual: val.len()
            })
        }
    }

    /// Appends a valid item.
    ///
    /// # Panics
    ///
    /// If `val.len()` differs from the byte width. Use [Self::try_append]
    /// to get an error instead.
    #[inline]
    pub fn append(&mut self, val: &[u8]) {
        if let Err(err) = self.check_width(val) {
            panic!("{}", err)
        }
        self.append_unchecked(val)
    }

    pub fn try_append(&mut self, val: &[u8]) -> Result<(), InvalidWidth> {
        self.check_width(val)?;
        self.append_unchecked(val);
        Ok(())
    }

    #[inline]
    fn append_unchecked(&mut self, val: &[u8]) {
        self.reserve(1);
        self.values.extend_from_slice(val);
        self.nulls.append(true);
    }

    pub fn append_option(&mut self, val: Option<&[u8]>) {
        if let Some(val) = val {
            self.append(val);
        } else {
            self.append_null();
        }
    }

    pub fn append_null(&mut self) {
        self.reserve(1);
        self.values.extend_zeros(self.size);
        self.nulls.append(false);
    }

    /// Appends a batch of items.
    ///
    /// `valid` is either empty (all items are valid) or has an entry per item.
    /// An empty item is a placeholder: its slot is zero-filled, while its validity
    /// still comes from `valid`.
    ///
    /// # Panics
    ///
    /// On validity length mismatch or when an item is neither empty nor
    /// of the byte width. Nothing is appended in that case.
    pub fn append_values<V: AsRef<[u8]>>(&mut self, values: &[V], valid: &[bool]) {
        if let Err(err) = self.try_append_values(values, valid) {
            panic!("{}", err)
        }
    }

    /// Same as [Self::append_values], but reports [LengthMismatch] and [InvalidWidth]
    /// as errors. The builder is left untouched on failure.
    pub fn try_append_values<V: AsRef<[u8]>>(
        &mut self,
        values: &[V],
        valid: &[bool]
    ) -> anyhow::Result<()>
    {
        if !valid.is_empty() && valid.len() != values.len() {
            return Err(LengthMismatch {
                values: values.len(),
                valid: valid.len()
            }.into())
        }

        if values.is_empty() {
            return Ok(())
        }

        for val in values.iter() {
            let val = val.as_ref();
            if !val.is_empty() {
                self.check_width(val)?;
            }
        }

        self.reserve(values.len());

        for val in values.iter() {
            let val = val.as_ref();
            if val.is_empty() {
                self.values.extend_zeros(self.size)
            } else {
                self.values.extend_from_slice(val)
            }
        }

        if valid.is_empty() {
            self.nulls.append_many(true, values.len())
        } else {
            self.nulls.append_bools(valid)
        }

        Ok(())
    }

    /// Ensures there is room for `additional` more items
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        let required = self.len() + additional;
        if required > self.capacity {
            let new_capacity = std::cmp::max(required.next_power_of_two(), MIN_CAPACITY);
            self.resize(new_capacity)
        }
    }

    /// Sets the capacity to exactly `capacity` items.
    ///
    /// Items past the new capacity are dropped.
    pub fn resize(&mut self, capacity: usize) {
        trace!(
            from = self.capacity,
            to = capacity,
            width = self.size,
            "resizing fixed size binary builder"
        );
        self.nulls.set_capacity(capacity);
        self.values.set_capacity(capacity * self.size);
        self.capacity = capacity;
    }

    /// Returns the item at `i` or `None` if it is null
    pub fn value(&self, i: usize) -> Option<&[u8]> {
        if self.nulls.is_valid(i) {
            let beg = i * self.size;
            Some(&self.values.as_slice()[beg..beg + self.size])
        } else {
            None
        }
    }

    /// Builds an array out of accumulated items and resets the builder.
    ///
    /// Buffers are moved into the array without copying.
    /// The builder starts over with empty storage.
    pub fn finish(&mut self) -> FixedSizeBinaryArray {
        let allocator = self.allocator().clone();
        let nulls = std::mem::replace(&mut self.nulls, NullmaskBuilder::new(allocator.clone(), 0));
        let values = std::mem::replace(&mut self.values, RawBuffer::new(allocator));
        self.capacity = 0;

        debug!(
            len = nulls.len(),
            null_count = nulls.null_count(),
            width = self.size,
            "finished fixed size binary array"
        );

        FixedSizeBinaryArray::new(self.size as i32, values.into_buffer(), nulls.finish())
    }
}


impl ArrayBuilder for FixedSizeBinaryBuilder {
    fn data_type(&self) -> DataType {
        DataType::FixedSizeBinary(self.size as i32)
    }

    fn len(&self) -> usize {
        self.nulls.len()
    }

    fn byte_size(&self) -> usize {
        self.nulls.byte_size() + self.values.len()
    }

    fn clear(&mut self) {
        self.nulls.clear();
        self.values.clear()
    }

    fn finish(&mut self) -> ArrayRef {
        Arc::new(FixedSizeBinaryBuilder::finish(self))
    }
}


impl AsSlice for FixedSizeBinaryBuilder {
    type Slice<'a> = FixedSizeBinarySlice<'a>;

    fn as_slice(&self) -> Self::Slice<'_> {
        FixedSizeBinarySlice::from_parts(
            self.size,
            self.values.as_slice(),
            self.nulls.as_slice()
        )
    }
}


#[cfg(test)]
mod test {
    use super::FixedSizeBinaryBuilder;
    use crate::access::Access;
    use crate::slice::AsSlice;
    use arrow::array::Array;


    #[test]
    fn null_slots_are_zeroed() {
        let mut builder = FixedSizeBinaryBuilder::new(2, 0);
        builder.append(&[7, 7]);
        builder.append_null();
        let values: [&[u8]; 2] = [&[], &[9, 9]];
        builder.append_values(&values, &[true, true]);

        let slice = builder.as_slice();
        assert_eq!(slice.values(), &[7, 7, 0, 0, 0, 0, 9, 9]);
        assert!(slice.is_null(1));
        assert!(slice.is_valid(2));
    }

    #[test]
    fn capacity_grows_by_powers_of_two() {
        let mut builder = FixedSizeBinaryBuilder::new(1, 0);
        assert_eq!(builder.capacity(), 0);

        builder.append(&[1]);
        assert_eq!(builder.capacity(), 32);

        builder.reserve(40);
        assert_eq!(builder.capacity(), 64);
    }

    #[test]
    fn shrinking_truncates_items() {
        let mut builder = FixedSizeBinaryBuilder::new(1, 16);
        builder.append_values(&[[1u8], [2], [3], [4], [5]], &[true, false, true, false, false]);
        assert_eq!(builder.null_count(), 3);

        builder.resize(3);
        assert_eq!(builder.len(), 3);
        assert_eq!(builder.capacity(), 3);
        assert_eq!(builder.null_count(), 1);
        assert_eq!(builder.value(0), Some(&[1][..]));
        assert_eq!(builder.value(2), Some(&[3][..]));

        let array = builder.finish();
        assert_eq!(array.len(), 3);
        assert_eq!(array.null_count(), 1);
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut builder = FixedSizeBinaryBuilder::new(4, 10);
        builder.append(b"abcd");
        builder.append_null();
        super::ArrayBuilder::clear(&mut builder);

        assert_eq!(builder.len(), 0);
        assert_eq!(builder.null_count(), 0);
        assert_eq!(builder.capacity(), 10);
    }
}
