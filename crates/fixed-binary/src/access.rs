use arrow::array::{Array, FixedSizeBinaryArray};


pub trait Access {
    type Value;

    fn get(&self, i: usize) -> Self::Value;

    fn is_valid(&self, i: usize) -> bool;

    #[inline]
    fn is_null(&self, i: usize) -> bool {
        !self.is_valid(i)
    }

    fn has_nulls(&self) -> bool;

    /// Returns `None` for null items
    #[inline]
    fn get_option(&self, i: usize) -> Option<Self::Value> {
        self.is_valid(i).then(|| self.get(i))
    }
}


impl <'a, T: Access> Access for &'a T {
    type Value = T::Value;

    #[inline]
    fn get(&self, i: usize) -> Self::Value {
        (*self).get(i)
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        (*self).is_valid(i)
    }

    #[inline]
    fn has_nulls(&self) -> bool {
        (*self).has_nulls()
    }
}


impl <'a> Access for &'a FixedSizeBinaryArray {
    type Value = &'a [u8];

    #[inline]
    fn get(&self, i: usize) -> Self::Value {
        FixedSizeBinaryArray::value(*self, i)
    }

    #[inline]
    fn is_valid(&self, i: usize) -> bool {
        Array::is_valid(*self, i)
    }

    fn has_nulls(&self) -> bool {
        self.null_count() > 0
    }
}
