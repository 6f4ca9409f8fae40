use crate::access::Access;
use crate::slice::bitmask::BitmaskSlice;
use crate::slice::nullmask::NullmaskSlice;
use arrow::array::{Array, FixedSizeBinaryArray};


/// Read-only view over fixed-width items and their validity
#[derive(Clone)]
pub struct FixedSizeBinarySlice<'a> {
    size: usize,
    nulls: NullmaskSlice<'a>,
    values: &'a [u8],
}


impl<'a> FixedSizeBinarySlice<'a> {
    pub fn new(size: usize, values: &'a [u8], nulls: Option<BitmaskSlice<'a>>) -> Self {
        assert!(size > 0);
        assert!(values.len() % size == 0);
        let len = values.len() / size;
        Self {
            size,
            nulls: NullmaskSlice::new(len, nulls),
            values,
        }
    }

    pub(crate) fn from_parts(size: usize, values: &'a [u8], nulls: NullmaskSlice<'a>) -> Self {
        assert_eq!(values.len(), nulls.len() * size);
        Self {
            size,
            nulls,
            values
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
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
    pub fn nulls(&self) -> NullmaskSlice<'a> {
        self.nulls.clone()
    }

    #[inline]
    pub fn values(&self) -> &'a [u8] {
        self.values
    }

    pub fn slice(&self, offset: usize, len: usize) -> Self {
        let beg = offset * self.size;
        let end = beg + len * self.size;
        Self {
            size: self.size,
            nulls: self.nulls.slice(offset, len),
            values: &self.values[beg..end]
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&'a [u8]>> + '_ {
        (0..self.len()).map(|i| self.get_option(i))
    }
}


impl<'a> Access for FixedSizeBinarySlice<'a> {
    type Value = &'a [u8];

    #[inline]
    fn get(&self, i: usize) -> Self::Value {
        let beg = i * self.size;
        let end = beg + self.size;
        &self.values[beg..end]
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        self.nulls.is_valid(i)
    }

    #[inline]
    fn has_nulls(&self) -> bool {
        self.nulls.has_nulls()
    }
}


impl<'a> From<&'a FixedSizeBinaryArray> for FixedSizeBinarySlice<'a> {
    fn from(value: &'a FixedSizeBinaryArray) -> Self {
        let size = value.value_length() as usize;
        let values = &value.value_data()[..value.len() * size];
        Self::from_parts(size, values, NullmaskSlice::from_array(value))
    }
}
