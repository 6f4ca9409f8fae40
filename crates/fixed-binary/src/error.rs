use std::fmt::{Display, Formatter};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidWidth {
    pub expected: usize,
    pub actual: usize
}


impl Display for InvalidWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid binary length (got={}, want={})",
            self.actual,
            self.expected
        )
    }
}


impl std::error::Error for InvalidWidth {}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthMismatch {
    pub values: usize,
    pub valid: usize
}


impl Display for LengthMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "validity mask length {} does not match the number of values {}",
            self.valid,
            self.values
        )
    }
}


impl std::error::Error for LengthMismatch {}


#[derive(Debug)]
pub struct DoubleRelease;


impl Display for DoubleRelease {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "too many releases")
    }
}


impl std::error::Error for DoubleRelease {}


/// Decoded item doesn't have the expected byte width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeError {
    pub value: String,
    pub width: usize,
    pub offset: usize
}


impl Display for ShapeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "value {} at offset {} can't be unpacked into FixedSizeBinary[{}]",
            self.value,
            self.offset,
            self.width
        )
    }
}


impl std::error::Error for ShapeError {}


/// Token of a kind that can't represent a binary item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeError {
    pub value: String,
    pub width: usize,
    pub offset: usize
}


impl Display for TypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected token {} at offset {} for FixedSizeBinary[{}]",
            self.value,
            self.offset,
            self.width
        )
    }
}


impl std::error::Error for TypeError {}


/// Input is not shaped as an array of items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub found: String
}


impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fixed size binary builder must unpack from json array, found {}", self.found)
    }
}


impl std::error::Error for FormatError {}
