//! Structural scanning over input that has already been validated.
//!
//! The cursor never decodes values. It only needs to know where strings
//! begin and end (honoring backslash escapes, so quoted braces, brackets and
//! commas do not count) and how deep the current brace/bracket nesting is.
//! Because validation ran first, any byte sequence the cursor sees is
//! well-formed and malformed-input handling reduces to returning `None`.

use alloc::vec::Vec;
use core::ops::Range;

pub(crate) fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub(crate) fn skip_ws(&mut self) -> Option<u8> {
        while let Some(byte) = self.peek() {
            if !is_space(byte) {
                return Some(byte);
            }
            self.pos += 1;
        }
        None
    }

    /// Consumes `byte` if it is the next non-whitespace byte.
    pub(crate) fn eat(&mut self, byte: u8) -> bool {
        if self.skip_ws() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips a string literal starting at the current `"`, returning the span
    /// including both quotes.
    pub(crate) fn skip_string(&mut self) -> Option<Range<usize>> {
        let start = self.pos;
        if self.peek() != Some(b'"') {
            return None;
        }
        let mut idx = start + 1;
        while idx < self.bytes.len() {
            match self.bytes[idx] {
                b'"' => {
                    self.pos = idx + 1;
                    return Some(start..self.pos);
                }
                b'\\' => idx += 2,
                _ => idx += 1,
            }
        }
        None
    }

    /// Skips whitespace and then exactly one value, returning its span.
    pub(crate) fn skip_value(&mut self) -> Option<Range<usize>> {
        match self.skip_ws()? {
            b'"' => self.skip_string(),
            b'{' | b'[' => self.skip_container(),
            _ => {
                let start = self.pos;
                while let Some(byte) = self.peek() {
                    if is_space(byte) || matches!(byte, b',' | b'}' | b']') {
                        break;
                    }
                    self.pos += 1;
                }
                (self.pos > start).then_some(start..self.pos)
            }
        }
    }

    fn skip_container(&mut self) -> Option<Range<usize>> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        for (offset, &byte) in self.bytes[start..].iter().enumerate() {
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
                continue;
            }
            match byte {
                b'"' => in_string = true,
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = start + offset + 1;
                        return Some(start..self.pos);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// One `"key": value` pair inside an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Member {
    /// The key including its quotes.
    pub key: Range<usize>,
    pub value: Range<usize>,
}

impl Member {
    /// The key's bytes between its quotes.
    pub(crate) fn raw_key<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.key.start + 1..self.key.end - 1]
    }
}

/// The members of one object, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ObjectView {
    /// Offset of the opening `{`.
    pub open: usize,
    /// Offset of the closing `}`.
    pub close: usize,
    pub members: Vec<Member>,
}

impl ObjectView {
    /// Enumerates the members of the object whose `{` is at `open`.
    pub(crate) fn scan(bytes: &[u8], open: usize) -> Option<Self> {
        if bytes.get(open) != Some(&b'{') {
            return None;
        }
        let mut cursor = Cursor::new(bytes, open + 1);
        let mut members = Vec::new();
        if cursor.skip_ws()? != b'}' {
            loop {
                cursor.skip_ws()?;
                let key = cursor.skip_string()?;
                if !cursor.eat(b':') {
                    return None;
                }
                let value = cursor.skip_value()?;
                members.push(Member { key, value });
                if !cursor.eat(b',') {
                    break;
                }
            }
            cursor.skip_ws()?;
        }
        if cursor.peek() != Some(b'}') {
            return None;
        }
        Some(Self {
            open,
            close: cursor.pos(),
            members,
        })
    }

    /// Index of the first member whose key decodes to `segment`.
    pub(crate) fn find(&self, bytes: &[u8], segment: &str) -> Option<usize> {
        self.members
            .iter()
            .position(|member| crate::key::key_matches(member.raw_key(bytes), segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_of(input: &[u8]) -> &[u8] {
        let mut cursor = Cursor::new(input, 0);
        let span = cursor.skip_value().expect("value");
        &input[span]
    }

    #[test]
    fn skips_scalars_up_to_delimiters() {
        assert_eq!(value_of(b"  -1.5e3 ,"), b"-1.5e3");
        assert_eq!(value_of(b"true}"), b"true");
        assert_eq!(value_of(b"null]"), b"null");
        assert_eq!(value_of(b"7"), b"7");
    }

    #[test]
    fn skips_strings_with_escaped_quotes() {
        assert_eq!(value_of(br#""a\"b\\" tail"#), br#""a\"b\\""#);
    }

    #[test]
    fn quoted_delimiters_do_not_change_depth() {
        let input = br#"{"k":"}]{[,","n":[{"x":"\"}"}]} ,"rest""#;
        assert_eq!(
            value_of(input),
            br#"{"k":"}]{[,","n":[{"x":"\"}"}]}"#
        );
    }

    #[test]
    fn scans_members_in_order() {
        let input = br#"{ "a" : 1 , "b":[1,{"c":2}],"d":"}" }"#;
        let view = ObjectView::scan(input, 0).expect("object");
        assert_eq!(view.open, 0);
        assert_eq!(view.close, input.len() - 1);
        assert_eq!(view.members.len(), 3);
        assert_eq!(view.members[0].raw_key(input), b"a");
        assert_eq!(&input[view.members[0].value.clone()], b"1");
        assert_eq!(&input[view.members[1].value.clone()], br#"[1,{"c":2}]"#);
        assert_eq!(&input[view.members[2].value.clone()], br#""}""#);
        assert_eq!(view.find(input, "b"), Some(1));
        assert_eq!(view.find(input, "c"), None);
    }

    #[test]
    fn scans_empty_objects() {
        let view = ObjectView::scan(b"{ \n }", 0).expect("object");
        assert!(view.members.is_empty());
        assert_eq!(view.close, 4);
        assert_eq!(ObjectView::scan(b"[]", 0), None);
    }

    #[test]
    fn first_duplicate_wins() {
        let input = br#"{"k":1,"k":2}"#;
        let view = ObjectView::scan(input, 0).expect("object");
        assert_eq!(view.find(input, "k"), Some(0));
    }
}
