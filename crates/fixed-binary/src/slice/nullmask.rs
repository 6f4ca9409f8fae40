use crate::slice::bitmask::BitmaskSlice;
use arrow::array::Array;


#[derive(Clone)]
pub struct NullmaskSlice<'a> {
    nulls: Option<BitmaskSlice<'a>>,
    len: usize
}


impl<'a> NullmaskSlice<'a> {
    pub fn new(len: usize, nulls: Option<BitmaskSlice<'a>>) -> Self {
        if let Some(nulls) = nulls.as_ref() {
            assert_eq!(nulls.len(), len);
        }
        Self {
            nulls,
            len
        }
    }

    pub fn from_array(array: &'a impl Array) -> Self {
        Self::new(
            array.len(),
            array.nulls()
                .filter(|nulls| nulls.null_count() > 0)
                .map(|nulls| nulls.inner().into())
        )
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len);
        Self {
            nulls: self.nulls.as_ref().map(|nulls| nulls.slice(offset, len)),
            len
        }
    }

    #[inline]
    pub fn is_valid(&self, i: usize) -> bool {
        assert!(i < self.len);
        self.nulls.as_ref().map(|nulls| nulls.value(i)).unwrap_or(true)
    }

    #[inline]
    pub fn has_nulls(&self) -> bool {
        self.nulls.is_some()
    }
}
