use crate::builder::FixedSizeBinaryBuilder;
use crate::error::{FormatError, ShapeError, TypeError};
use crate::json::token::{JsonTokenStream, Token, TokenStream};
use anyhow::Context;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;


impl FixedSizeBinaryBuilder {
    /// Appends items of a JSON array.
    ///
    /// Decoding stops at the first error, items appended before it are kept.
    pub fn decode_json(&mut self, data: &[u8]) -> anyhow::Result<()> {
        let input = std::str::from_utf8(data).context("json input is not valid utf-8")?;
        self.decode_tokens(&mut JsonTokenStream::new(input))
    }

    pub fn decode_tokens(&mut self, tokens: &mut impl TokenStream) -> anyhow::Result<()> {
        match tokens.next_token()? {
            Some(Token::ArrayOpen) => {},
            Some(token) => return Err(FormatError { found: token.to_string() }.into()),
            None => return Err(end_of_input())
        }
        loop {
            let token = match tokens.next_token()? {
                Some(token) => token,
                None => return Err(end_of_input())
            };
            match token {
                Token::ArrayClose => return Ok(()),
                Token::Null => self.append_null(),
                Token::String(s) => {
                    let value = STANDARD_NO_PAD.decode(&s).with_context(|| {
                        format!("invalid base64 string at offset {}", tokens.offset())
                    })?;
                    self.append_decoded(value, tokens.offset())?
                },
                Token::Bytes(value) => self.append_decoded(value, tokens.offset())?,
                token => return Err(TypeError {
                    value: token.to_string(),
                    width: self.byte_width(),
                    offset: tokens.offset()
                }.into())
            }
        }
    }

    fn append_decoded(&mut self, value: Vec<u8>, offset: usize) -> anyhow::Result<()> {
        if value.len() != self.byte_width() {
            return Err(ShapeError {
                value: format!("{:?}", value),
                width: self.byte_width(),
                offset
            }.into())
        }
        self.append(&value);
        Ok(())
    }
}


fn end_of_input() -> anyhow::Error {
    FormatError {
        found: "end of input".to_string()
    }.into()
}
