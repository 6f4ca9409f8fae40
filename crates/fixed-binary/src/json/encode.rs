use crate::access::Access;
use crate::slice::FixedSizeBinarySlice;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::ser::{Serialize, SerializeSeq, Serializer};


impl Serialize for FixedSizeBinarySlice<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for i in 0..self.len() {
            if self.is_valid(i) {
                seq.serialize_element(&STANDARD_NO_PAD.encode(self.get(i)))?;
            } else {
                seq.serialize_element(&())?;
            }
        }
        seq.end()
    }
}


/// Renders items as a JSON array of base64 strings and nulls
pub fn encode<'a>(items: impl Into<FixedSizeBinarySlice<'a>>) -> anyhow::Result<String> {
    let json = serde_json::to_string(&items.into())?;
    Ok(json)
}
