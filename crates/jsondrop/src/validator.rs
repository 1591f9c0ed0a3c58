//! Well-formedness check run before any edit.
//!
//! The validator is a byte-at-a-time state machine over the raw input. It
//! keeps nothing but its current state and a stack of open containers, so it
//! runs in linear time with no recursion regardless of nesting depth.
//!
//! Diagnostics follow the vocabulary callers already match on:
//! `invalid character <c> <context>` for a byte that cannot appear where it
//! does, and `unexpected end of JSON input` for a truncated document. Bytes
//! inside string literals are not checked for UTF-8 validity; only control
//! characters are rejected there.

use alloc::vec::Vec;

use crate::error::{DecodeError, SyntaxError};

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

const BEGINNING_OF_VALUE: &str = "looking for beginning of value";
const BEGINNING_OF_KEY: &str = "looking for beginning of object key string";

/// Checks that `input` is exactly one well-formed JSON value, optionally
/// surrounded by whitespace.
///
/// Containers nested deeper than `max_depth` are rejected with
/// `exceeded max depth`.
///
/// # Errors
///
/// Returns a [`DecodeError`] describing the first offending byte, or
/// [`SyntaxError::UnexpectedEnd`] when the input stops mid-value.
///
/// # Examples
///
/// ```rust
/// use jsondrop::{DEFAULT_MAX_DEPTH, validate};
///
/// assert!(validate(br#"{"a": [1, 2.5e3, "x"]}"#, DEFAULT_MAX_DEPTH).is_ok());
///
/// let err = validate(b"[1,,2]", DEFAULT_MAX_DEPTH).unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "invalid character ',' looking for beginning of value"
/// );
/// ```
pub fn validate(input: &[u8], max_depth: usize) -> Result<(), DecodeError> {
    let mut validator = Validator::new(max_depth);
    for (idx, &byte) in input.iter().enumerate() {
        validator
            .step(byte)
            .map_err(|kind| DecodeError::new(kind, idx + 1))?;
    }
    validator
        .finish()
        .map_err(|kind| DecodeError::new(kind, input.len()))
}

/// What the innermost open container expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    ObjectKey,
    ObjectValue,
    ArrayValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeginValue,
    /// Just after `[`.
    BeginValueOrEmpty,
    /// Just after `{`.
    BeginKeyOrEmpty,
    /// After `,` inside an object.
    BeginKey,
    EndValue,
    EndTop,
    InString,
    InStringEscape,
    /// Inside `\u`, with this many hex digits still to read.
    InStringEscapeU(u8),
    /// After a leading `-`.
    Neg,
    /// After a leading `0`, or after the integer digits.
    Zero,
    /// Inside integer digits that started with 1-9.
    Digits,
    Dot,
    DotDigits,
    Exponent,
    ExponentSign,
    ExponentDigits,
    /// Inside `true`, `false` or `null`; `next` indexes the expected letter.
    Literal { word: &'static str, next: u8 },
}

struct Validator {
    state: State,
    stack: Vec<Frame>,
    max_depth: usize,
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

fn invalid(byte: u8, context: &'static str) -> SyntaxError {
    SyntaxError::InvalidCharacter { byte, context }
}

impl Validator {
    fn new(max_depth: usize) -> Self {
        Self {
            state: State::BeginValue,
            stack: Vec::new(),
            max_depth,
        }
    }

    fn finish(mut self) -> Result<(), SyntaxError> {
        if self.state == State::EndTop {
            return Ok(());
        }
        // A trailing space terminates a bare top-level number and surfaces
        // the error for anything left half-written.
        self.step(b' ')?;
        if self.state == State::EndTop {
            Ok(())
        } else {
            Err(SyntaxError::UnexpectedEnd)
        }
    }

    fn step(&mut self, c: u8) -> Result<(), SyntaxError> {
        match self.state {
            State::BeginValue => self.begin_value(c),
            State::BeginValueOrEmpty => {
                if is_space(c) {
                    Ok(())
                } else if c == b']' {
                    self.end_value(c)
                } else {
                    self.begin_value(c)
                }
            }
            State::BeginKeyOrEmpty => {
                if is_space(c) {
                    Ok(())
                } else if c == b'}' {
                    if let Some(top) = self.stack.last_mut() {
                        *top = Frame::ObjectValue;
                    }
                    self.end_value(c)
                } else {
                    self.begin_key(c)
                }
            }
            State::BeginKey => self.begin_key(c),
            State::EndValue => self.end_value(c),
            State::EndTop => {
                if is_space(c) {
                    Ok(())
                } else {
                    Err(invalid(c, "after top-level value"))
                }
            }
            State::InString => match c {
                b'"' => {
                    self.state = State::EndValue;
                    Ok(())
                }
                b'\\' => {
                    self.state = State::InStringEscape;
                    Ok(())
                }
                0x00..=0x1F => Err(invalid(c, "in string literal")),
                _ => Ok(()),
            },
            State::InStringEscape => match c {
                b'b' | b'f' | b'n' | b'r' | b't' | b'\\' | b'/' | b'"' => {
                    self.state = State::InString;
                    Ok(())
                }
                b'u' => {
                    self.state = State::InStringEscapeU(4);
                    Ok(())
                }
                _ => Err(invalid(c, "in string escape code")),
            },
            State::InStringEscapeU(remaining) => {
                if !c.is_ascii_hexdigit() {
                    return Err(invalid(c, "in \\u hexadecimal character escape"));
                }
                self.state = if remaining == 1 {
                    State::InString
                } else {
                    State::InStringEscapeU(remaining - 1)
                };
                Ok(())
            }
            State::Neg => match c {
                b'0' => {
                    self.state = State::Zero;
                    Ok(())
                }
                b'1'..=b'9' => {
                    self.state = State::Digits;
                    Ok(())
                }
                _ => Err(invalid(c, "in numeric literal")),
            },
            State::Digits => {
                if c.is_ascii_digit() {
                    Ok(())
                } else {
                    self.after_integer(c)
                }
            }
            State::Zero => self.after_integer(c),
            State::Dot => {
                if c.is_ascii_digit() {
                    self.state = State::DotDigits;
                    Ok(())
                } else {
                    Err(invalid(c, "after decimal point in numeric literal"))
                }
            }
            State::DotDigits => match c {
                b'0'..=b'9' => Ok(()),
                b'e' | b'E' => {
                    self.state = State::Exponent;
                    Ok(())
                }
                _ => self.end_value(c),
            },
            State::Exponent => {
                if c == b'+' || c == b'-' {
                    self.state = State::ExponentSign;
                    Ok(())
                } else {
                    self.exponent_sign(c)
                }
            }
            State::ExponentSign => self.exponent_sign(c),
            State::ExponentDigits => {
                if c.is_ascii_digit() {
                    Ok(())
                } else {
                    self.end_value(c)
                }
            }
            State::Literal { word, next } => self.literal(word, next, c),
        }
    }

    fn begin_value(&mut self, c: u8) -> Result<(), SyntaxError> {
        if is_space(c) {
            return Ok(());
        }
        self.state = match c {
            b'{' => {
                self.push(c, Frame::ObjectKey)?;
                State::BeginKeyOrEmpty
            }
            b'[' => {
                self.push(c, Frame::ArrayValue)?;
                State::BeginValueOrEmpty
            }
            b'"' => State::InString,
            b'-' => State::Neg,
            b'0' => State::Zero,
            b'1'..=b'9' => State::Digits,
            b't' => State::Literal {
                word: "true",
                next: 1,
            },
            b'f' => State::Literal {
                word: "false",
                next: 1,
            },
            b'n' => State::Literal {
                word: "null",
                next: 1,
            },
            _ => return Err(invalid(c, BEGINNING_OF_VALUE)),
        };
        Ok(())
    }

    fn begin_key(&mut self, c: u8) -> Result<(), SyntaxError> {
        if is_space(c) {
            return Ok(());
        }
        if c == b'"' {
            self.state = State::InString;
            Ok(())
        } else {
            Err(invalid(c, BEGINNING_OF_KEY))
        }
    }

    fn end_value(&mut self, c: u8) -> Result<(), SyntaxError> {
        let Some(&frame) = self.stack.last() else {
            self.state = State::EndTop;
            return self.step(c);
        };
        if is_space(c) {
            self.state = State::EndValue;
            return Ok(());
        }
        match (frame, c) {
            (Frame::ObjectKey, b':') => {
                self.set_top(Frame::ObjectValue);
                self.state = State::BeginValue;
                Ok(())
            }
            (Frame::ObjectKey, _) => Err(invalid(c, "after object key")),
            (Frame::ObjectValue, b',') => {
                self.set_top(Frame::ObjectKey);
                self.state = State::BeginKey;
                Ok(())
            }
            (Frame::ObjectValue, b'}') | (Frame::ArrayValue, b']') => {
                self.pop();
                Ok(())
            }
            (Frame::ObjectValue, _) => Err(invalid(c, "after object key:value pair")),
            (Frame::ArrayValue, b',') => {
                self.state = State::BeginValue;
                Ok(())
            }
            (Frame::ArrayValue, _) => Err(invalid(c, "after array element")),
        }
    }

    fn after_integer(&mut self, c: u8) -> Result<(), SyntaxError> {
        match c {
            b'.' => {
                self.state = State::Dot;
                Ok(())
            }
            b'e' | b'E' => {
                self.state = State::Exponent;
                Ok(())
            }
            _ => self.end_value(c),
        }
    }

    fn exponent_sign(&mut self, c: u8) -> Result<(), SyntaxError> {
        if c.is_ascii_digit() {
            self.state = State::ExponentDigits;
            Ok(())
        } else {
            Err(invalid(c, "in exponent of numeric literal"))
        }
    }

    fn literal(&mut self, word: &'static str, next: u8, c: u8) -> Result<(), SyntaxError> {
        let bytes = word.as_bytes();
        let idx = usize::from(next);
        let expected = bytes[idx];
        if c != expected {
            return Err(invalid(c, literal_context(word, expected)));
        }
        self.state = if idx + 1 == bytes.len() {
            State::EndValue
        } else {
            State::Literal {
                word,
                next: next + 1,
            }
        };
        Ok(())
    }

    fn push(&mut self, c: u8, frame: Frame) -> Result<(), SyntaxError> {
        self.stack.push(frame);
        if self.stack.len() > self.max_depth {
            return Err(invalid(c, "exceeded max depth"));
        }
        Ok(())
    }

    fn pop(&mut self) {
        self.stack.pop();
        self.state = if self.stack.is_empty() {
            State::EndTop
        } else {
            State::EndValue
        };
    }

    fn set_top(&mut self, frame: Frame) {
        if let Some(top) = self.stack.last_mut() {
            *top = frame;
        }
    }
}

fn literal_context(word: &str, expected: u8) -> &'static str {
    match (word, expected) {
        ("true", b'r') => "in literal true (expecting 'r')",
        ("true", b'u') => "in literal true (expecting 'u')",
        ("true", _) => "in literal true (expecting 'e')",
        ("false", b'a') => "in literal false (expecting 'a')",
        ("false", b'l') => "in literal false (expecting 'l')",
        ("false", b's') => "in literal false (expecting 's')",
        ("false", _) => "in literal false (expecting 'e')",
        ("null", b'u') => "in literal null (expecting 'u')",
        _ => "in literal null (expecting 'l')",
    }
}

#[cfg(test)]
mod tests {
    use alloc::{
        string::{String, ToString},
        vec::Vec,
    };

    use rstest::rstest;

    use super::*;

    fn message(input: &str) -> String {
        validate(input.as_bytes(), DEFAULT_MAX_DEPTH)
            .unwrap_err()
            .to_string()
    }

    #[rstest]
    #[case("{}")]
    #[case("[]")]
    #[case(" \t\r\n{ } \n")]
    #[case("0")]
    #[case("-0.5e+10")]
    #[case("12E-3")]
    #[case("123")]
    #[case("true")]
    #[case("null")]
    #[case(r#""é\n\"\\\/""#)]
    #[case(r#"{"a":[1,{"b":null}],"c":{"d":false}}"#)]
    #[case(r#"{"unicode":"héllo wörld"}"#)]
    fn accepts_well_formed(#[case] input: &str) {
        assert_eq!(validate(input.as_bytes(), DEFAULT_MAX_DEPTH), Ok(()));
    }

    #[rstest]
    #[case("", "unexpected end of JSON input")]
    #[case("   ", "unexpected end of JSON input")]
    #[case(r#"{"a":1"#, "unexpected end of JSON input")]
    #[case(r#"{"a"#, "unexpected end of JSON input")]
    #[case("{bad json", "invalid character 'b' looking for beginning of object key string")]
    #[case(r#"{"a":1,}"#, "invalid character '}' looking for beginning of object key string")]
    #[case("[1,]", "invalid character ']' looking for beginning of value")]
    #[case("[1,,2]", "invalid character ',' looking for beginning of value")]
    #[case(r#"{"a" 1}"#, "invalid character '1' after object key")]
    #[case(r#"{"a":1 "b":2}"#, "invalid character '\"' after object key:value pair")]
    #[case("[1 2]", "invalid character '2' after array element")]
    #[case("{} {}", "invalid character '{' after top-level value")]
    #[case("\"a\tb\"", r"invalid character '\t' in string literal")]
    #[case(r#""\x""#, "invalid character 'x' in string escape code")]
    #[case(r#""\u12g4""#, r"invalid character 'g' in \u hexadecimal character escape")]
    #[case("-a", "invalid character 'a' in numeric literal")]
    #[case("-", "invalid character ' ' in numeric literal")]
    #[case("1.e5", "invalid character 'e' after decimal point in numeric literal")]
    #[case("1e+", "invalid character ' ' in exponent of numeric literal")]
    #[case("01", "invalid character '1' after top-level value")]
    #[case("tru", "invalid character ' ' in literal true (expecting 'e')")]
    #[case("fals3", "invalid character '3' in literal false (expecting 'e')")]
    #[case("nul", "invalid character ' ' in literal null (expecting 'l')")]
    #[case("tx", "invalid character 'x' in literal true (expecting 'r')")]
    #[case("'a'", r"invalid character '\'' looking for beginning of value")]
    fn reports_decoder_messages(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(message(input), expected);
    }

    #[test]
    fn offset_counts_the_offending_byte() {
        let err = validate(b"[1,,2]", DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(err.offset, 4);

        let err = validate(br#"{"a":"#, DEFAULT_MAX_DEPTH).unwrap_err();
        assert_eq!(err.kind(), SyntaxError::UnexpectedEnd);
        assert_eq!(err.offset, 5);
    }

    #[test]
    fn string_contents_do_not_affect_structure() {
        let input = br#"{"k":"}],{[\"","j":"\\"}"#;
        assert_eq!(validate(input, DEFAULT_MAX_DEPTH), Ok(()));
    }

    #[test]
    fn invalid_utf8_in_strings_is_accepted() {
        let input = b"{\"k\":\"\xff\xfe\"}";
        assert_eq!(validate(input, DEFAULT_MAX_DEPTH), Ok(()));
    }

    #[test]
    fn nesting_beyond_max_depth_is_rejected() {
        let mut deep: Vec<u8> = Vec::new();
        deep.extend(core::iter::repeat_n(b'[', 3));
        deep.extend(core::iter::repeat_n(b']', 3));
        assert_eq!(validate(&deep, 3), Ok(()));

        let err = validate(&deep, 2).unwrap_err();
        assert_eq!(err.to_string(), "invalid character '[' exceeded max depth");
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn very_deep_nesting_does_not_recurse() {
        let depth = 100_000;
        let mut deep: Vec<u8> = Vec::with_capacity(depth * 2);
        deep.extend(core::iter::repeat_n(b'[', depth));
        deep.extend(core::iter::repeat_n(b']', depth));
        assert_eq!(validate(&deep, usize::MAX), Ok(()));
        assert!(validate(&deep, DEFAULT_MAX_DEPTH).is_err());
    }
}
