use anyhow::{bail, Context};
use serde_json::value::RawValue;
use serde_json::Deserializer;
use std::fmt::{Display, Formatter};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    ArrayOpen,
    ArrayClose,
    String(String),
    Bytes(Vec<u8>),
    Null,
    /// Any other value, kept in its textual form
    Other(String)
}


impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::ArrayOpen => write!(f, "["),
            Token::ArrayClose => write!(f, "]"),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Bytes(bytes) => write!(f, "{:?}", bytes),
            Token::Null => write!(f, "null"),
            Token::Other(s) => write!(f, "{}", s)
        }
    }
}


pub trait TokenStream {
    /// Returns the next token or `None` when the input is exhausted
    fn next_token(&mut self) -> anyhow::Result<Option<Token>>;

    /// Input position right after the last returned token
    fn offset(&self) -> usize;
}


/// [TokenStream] over already tokenized input.
///
/// Offset is the number of consumed tokens.
pub struct TokenIter<I> {
    tokens: I,
    offset: usize
}


impl<I: Iterator<Item = Token>> TokenIter<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            offset: 0
        }
    }
}


impl<I: Iterator<Item = Token>> TokenStream for TokenIter<I> {
    fn next_token(&mut self) -> anyhow::Result<Option<Token>> {
        let token = self.tokens.next();
        if token.is_some() {
            self.offset += 1;
        }
        Ok(token)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}


#[derive(Copy, Clone)]
enum State {
    Start,
    FirstItem,
    NextItem,
    Done
}


/// Incremental tokenizer of JSON text.
///
/// A top level list is reported as [Token::ArrayOpen], followed by a token
/// for each of its items and [Token::ArrayClose]. Items are parsed one at a time,
/// so a syntax error surfaces only after all preceding items were returned.
/// Any other top level value is reported as a single token.
pub struct JsonTokenStream<'a> {
    input: &'a str,
    state: State,
    pos: usize,
    offset: usize
}


impl<'a> JsonTokenStream<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::Start,
            pos: 0,
            offset: 0
        }
    }

    fn skip_whitespace(&mut self) -> Option<u8> {
        let rest = &self.input[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
        self.input.as_bytes().get(self.pos).copied()
    }

    fn start(&mut self) -> anyhow::Result<Option<Token>> {
        if self.skip_whitespace() == Some(b'[') {
            self.pos += 1;
            self.offset = self.pos;
            self.state = State::FirstItem;
            return Ok(Some(Token::ArrayOpen))
        }
        let input = self.input;
        let raw: &'a RawValue = serde_json::from_str(input).context("malformed json value")?;
        let text = raw.get();
        self.offset = text.as_ptr() as usize - input.as_ptr() as usize + text.len();
        self.state = State::Done;
        to_token(raw).map(Some)
    }

    fn close(&mut self) -> anyhow::Result<Option<Token>> {
        self.pos += 1;
        self.offset = self.pos;
        self.state = State::Done;
        Ok(Some(Token::ArrayClose))
    }

    fn item(&mut self) -> anyhow::Result<Option<Token>> {
        let input = self.input;
        let mut values = Deserializer::from_str(&input[self.pos..]).into_iter::<&'a RawValue>();
        let raw = match values.next() {
            Some(raw) => raw.with_context(|| {
                format!("malformed json array item at offset {}", self.pos)
            })?,
            None => bail!("unexpected end of json array")
        };
        self.pos += values.byte_offset();
        self.offset = self.pos;
        self.state = State::NextItem;
        to_token(raw).map(Some)
    }
}


impl<'a> TokenStream for JsonTokenStream<'a> {
    fn next_token(&mut self) -> anyhow::Result<Option<Token>> {
        match self.state {
            State::Start => self.start(),
            State::FirstItem => match self.skip_whitespace() {
                Some(b']') => self.close(),
                _ => self.item()
            },
            State::NextItem => match self.skip_whitespace() {
                Some(b']') => self.close(),
                Some(b',') => {
                    self.pos += 1;
                    self.item()
                },
                Some(_) => bail!("expected `,` or `]` at offset {}", self.pos),
                None => bail!("unexpected end of json array")
            },
            State::Done => Ok(None)
        }
    }

    fn offset(&self) -> usize {
        self.offset
    }
}


fn to_token(raw: &RawValue) -> anyhow::Result<Token> {
    let text = raw.get();
    let token = match text.as_bytes().first() {
        Some(b'n') => Token::Null,
        Some(b'"') => Token::String(serde_json::from_str(text)?),
        Some(b'[') => match serde_json::from_str::<Vec<u8>>(text) {
            Ok(bytes) => Token::Bytes(bytes),
            Err(_) => Token::Other(text.to_string())
        },
        _ => Token::Other(text.to_string())
    };
    Ok(token)
}
