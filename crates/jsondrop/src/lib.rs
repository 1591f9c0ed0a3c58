//! Format-preserving removal of keys from raw JSON documents.
//!
//! `jsondrop` deletes a `"key": value` member from a JSON byte buffer without
//! decoding and re-encoding the document. Whitespace, key order, number
//! spelling and every other byte outside the removed member are copied
//! verbatim, so the output can still be compared byte-for-byte with other
//! copies of the same document.
//!
//! Every call first validates the whole buffer. Malformed input fails with a
//! [`DecodeError`] whose message names the offending byte, e.g.
//! `invalid character 'c' looking for beginning of object key string`. A path
//! that does not exist in the document is not an error: the input is returned
//! unchanged as [`Cow::Borrowed`](alloc::borrow::Cow::Borrowed).
//!
//! ```rust
//! let input = br#"{"a":"X","b":{"c":1,"d":[1,2]}}"#;
//!
//! let out = jsondrop::remove(input, &["b", "d"]).unwrap();
//! assert_eq!(&*out, br#"{"a":"X","b":{"c":1}}"#);
//!
//! let err = jsondrop::remove(b"{bad json", &["b"]).unwrap_err();
//! assert!(err.to_string().contains("invalid character"));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod cursor;
mod error;
mod key;
mod locator;
mod options;
mod remover;
mod splice;
mod validator;


use alloc::borrow::Cow;

pub use error::{DecodeError, SyntaxError};
pub use options::{MatchMode, RemoveOptions};
pub use remover::Remover;
pub use validator::{DEFAULT_MAX_DEPTH, validate};

/// Removes the member at `path` using default options.
///
/// See [`Remover::remove`].
///
/// # Errors
///
/// Returns [`DecodeError`] when `input` is not well-formed JSON.
pub fn remove<'a, K: AsRef<str>>(
    input: &'a [u8],
    path: &[K],
) -> Result<Cow<'a, [u8]>, DecodeError> {
    Remover::default().remove(input, path)
}

/// Removes several sibling members from the object at `parent` using default
/// options.
///
/// See [`Remover::remove_keys`].
///
/// # Errors
///
/// Returns [`DecodeError`] when `input` is not well-formed JSON.
pub fn remove_keys<'a, P: AsRef<str>, K: AsRef<str>>(
    input: &'a [u8],
    parent: &[P],
    keys: &[K],
) -> Result<Cow<'a, [u8]>, DecodeError> {
    Remover::default().remove_keys(input, parent, keys)
}

/// Removes the member at a path given as separate arguments.
///
/// `remove!(input, "a", "b")` is shorthand for
/// `jsondrop::remove(input, &["a", "b"])`.
///
/// ```rust
/// let out = jsondrop::remove!(br#"{"b":{"d":[1,2]}}"#, "b", "d").unwrap();
/// assert_eq!(&*out, br#"{"b":{}}"#);
/// ```
#[macro_export]
macro_rules! remove {
    ( $input:expr, $( $key:expr ),+ $(,)? ) => {
        $crate::remove($input, &[$($key),+])
    };
}
