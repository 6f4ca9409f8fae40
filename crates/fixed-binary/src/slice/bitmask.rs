use arrow_buffer::{bit_util, BooleanBuffer};


#[derive(Clone)]
pub struct BitmaskSlice<'a> {
    data: &'a [u8],
    offset: usize,
    len: usize
}


impl<'a> BitmaskSlice<'a> {
    pub fn new(data: &'a [u8], offset: usize, len: usize) -> Self {
        assert!(offset + len <= data.len() * 8);
        Self {
            data,
            offset,
            len
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn slice(&self, offset: usize, len: usize) -> Self {
        assert!(offset + len <= self.len);
        Self {
            data: self.data,
            offset: self.offset + offset,
            len
        }
    }

    #[inline]
    pub fn value(&self, i: usize) -> bool {
        assert!(i < self.len);
        bit_util::get_bit(self.data, self.offset + i)
    }
}


impl<'a> From<&'a BooleanBuffer> for BitmaskSlice<'a> {
    fn from(value: &'a BooleanBuffer) -> Self {
        Self {
            data: value.values(),
            offset: value.offset(),
            len: value.len()
        }
    }
}
