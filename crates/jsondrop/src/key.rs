//! Decoding of quoted object keys for comparison with path segments.
//!
//! Keys are compared by their decoded value, so `"\u0061"` matches the
//! segment `a`. Decoding follows the usual lenient rules: each byte of an
//! invalid UTF-8 sequence and each unpaired surrogate escape becomes U+FFFD.

use alloc::{borrow::Cow, string::String};

/// Returns `true` when the raw key (the bytes between its quotes) decodes to
/// `segment`.
pub(crate) fn key_matches(raw: &[u8], segment: &str) -> bool {
    if !raw.contains(&b'\\')
        && let Ok(text) = core::str::from_utf8(raw)
    {
        return text == segment;
    }
    decode_key(raw) == segment
}

/// Decodes the bytes between a key's quotes. The input must already have
/// passed validation, so every escape is complete.
pub(crate) fn decode_key(raw: &[u8]) -> Cow<'_, str> {
    if !raw.contains(&b'\\')
        && let Ok(text) = core::str::from_utf8(raw)
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(raw.len());
    let mut idx = 0;
    while idx < raw.len() {
        if raw[idx] == b'\\' {
            idx += decode_escape(&raw[idx..], &mut out);
            continue;
        }
        let (ch, len) = bstr::decode_utf8(&raw[idx..]);
        match ch {
            Some(ch) => {
                out.push(ch);
                idx += len;
            }
            None => {
                out.push(char::REPLACEMENT_CHARACTER);
                idx += 1;
            }
        }
    }
    Cow::Owned(out)
}

/// Decodes one escape sequence at the start of `raw`, returning how many
/// bytes it spans.
fn decode_escape(raw: &[u8], out: &mut String) -> usize {
    let simple = match raw.get(1) {
        Some(b'"') => '"',
        Some(b'\\') => '\\',
        Some(b'/') => '/',
        Some(b'b') => '\u{8}',
        Some(b'f') => '\u{c}',
        Some(b'n') => '\n',
        Some(b'r') => '\r',
        Some(b't') => '\t',
        Some(b'u') => return decode_unicode_escape(raw, out),
        _ => {
            out.push(char::REPLACEMENT_CHARACTER);
            return raw.len().min(2);
        }
    };
    out.push(simple);
    2
}

fn decode_unicode_escape(raw: &[u8], out: &mut String) -> usize {
    let Some(unit) = hex4(raw, 2) else {
        out.push(char::REPLACEMENT_CHARACTER);
        return raw.len().min(6);
    };

    if (0xD800..0xDC00).contains(&unit)
        && raw.get(6) == Some(&b'\\')
        && raw.get(7) == Some(&b'u')
        && let Some(low) = hex4(raw, 8)
        && (0xDC00..0xE000).contains(&low)
    {
        let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        return 12;
    }

    out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
    6
}

fn hex4(raw: &[u8], at: usize) -> Option<u32> {
    let digits = raw.get(at..at + 4)?;
    let text = core::str::from_utf8(digits).ok()?;
    u32::from_str_radix(text, 16).ok()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(b"plain", "plain")]
    #[case(b"", "")]
    #[case(br"\u0061bc", "abc")]
    #[case(br#"q\"uote"#, "q\"uote")]
    #[case(br"back\\slash\/", "back\\slash/")]
    #[case(br"\t\n\r\b\f", "\t\n\r\u{8}\u{c}")]
    #[case(br"\ud83d\ude00", "\u{1F600}")]
    #[case(br"\ud83dx", "\u{FFFD}x")]
    #[case(br"\ude00", "\u{FFFD}")]
    #[case(br"\ud83d\u0041", "\u{FFFD}A")]
    #[case("héllo".as_bytes(), "héllo")]
    #[case(b"a\xffb", "a\u{FFFD}b")]
    #[case(b"\xe2\x82", "\u{FFFD}\u{FFFD}")]
    fn decodes_keys(#[case] raw: &[u8], #[case] expected: &str) {
        assert_eq!(decode_key(raw), expected);
        assert!(key_matches(raw, expected));
    }

    #[test]
    fn unescaped_keys_are_borrowed() {
        assert!(matches!(decode_key(b"consent"), Cow::Borrowed("consent")));
    }

    #[test]
    fn mismatches() {
        assert!(!key_matches(b"test", "test2"));
        assert!(!key_matches(br"test", "tes"));
        assert!(!key_matches(b"Test", "test"));
    }
}
