use alloc::borrow::Cow;

use crate::{
    error::DecodeError,
    locator::locate,
    options::RemoveOptions,
    splice::{excise, span},
    validator::validate,
};

/// Removes keys from raw JSON while leaving every other byte untouched.
///
/// A `Remover` only carries its [`RemoveOptions`]; it holds no state between
/// calls and can be shared freely across threads.
///
/// Results are returned as a [`Cow`]: `Cow::Borrowed` means nothing matched
/// and the input is returned as is, `Cow::Owned` holds the edited copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Remover {
    options: RemoveOptions,
}

impl Remover {
    /// Creates a remover with the given options.
    #[must_use]
    pub fn new(options: RemoveOptions) -> Self {
        Self { options }
    }

    /// The options this remover was created with.
    #[must_use]
    pub fn options(&self) -> &RemoveOptions {
        &self.options
    }

    /// Removes the member at `path`.
    ///
    /// All segments but the last name the objects to descend through; the
    /// last names the member to remove. An empty path, a missing segment, or
    /// a segment that does not lead to an object all leave the input
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when `input` is not well-formed JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::borrow::Cow;
    ///
    /// use jsondrop::Remover;
    ///
    /// let remover = Remover::default();
    /// let out = remover.remove(br#"{"b":{"d":[1,2],"c":1},"e":9}"#, &["b", "d"]).unwrap();
    /// assert_eq!(&*out, br#"{"b":{"c":1},"e":9}"#);
    ///
    /// let out = remover.remove(br#"{"b":{"c":1}}"#, &["b", "z"]).unwrap();
    /// assert!(matches!(out, Cow::Borrowed(_)));
    /// ```
    pub fn remove<'a, K: AsRef<str>>(
        &self,
        input: &'a [u8],
        path: &[K],
    ) -> Result<Cow<'a, [u8]>, DecodeError> {
        self.validate(input)?;
        Ok(match path.split_last() {
            Some((key, parents)) => self.remove_validated(input, parents, &[key]),
            None => Cow::Borrowed(input),
        })
    }

    /// Removes every member named in `keys` from the object at `parent`.
    ///
    /// An empty `parent` targets the top-level object. Keys that are not
    /// present are skipped. The output does not depend on the order of
    /// `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when `input` is not well-formed JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsondrop::Remover;
    ///
    /// let input = br#"{"s":{"a":1,"b":2,"c":3}}"#;
    /// let out = Remover::default().remove_keys(input, &["s"], &["c", "a"]).unwrap();
    /// assert_eq!(&*out, br#"{"s":{"b":2}}"#);
    /// ```
    pub fn remove_keys<'a, P: AsRef<str>, K: AsRef<str>>(
        &self,
        input: &'a [u8],
        parent: &[P],
        keys: &[K],
    ) -> Result<Cow<'a, [u8]>, DecodeError> {
        self.validate(input)?;
        Ok(self.remove_validated(input, parent, keys))
    }

    fn validate(&self, input: &[u8]) -> Result<(), DecodeError> {
        validate(input, self.options.max_depth).inspect_err(|err| {
            tracing::debug!(offset = err.offset, error = %err, "input is not valid JSON");
        })
    }

    /// Each removal leaves the buffer well-formed, so validation is not
    /// repeated between keys.
    fn remove_validated<'a, P: AsRef<str>, K: AsRef<str>>(
        &self,
        input: &'a [u8],
        parent: &[P],
        keys: &[K],
    ) -> Cow<'a, [u8]> {
        let mut out = Cow::Borrowed(input);
        for key in keys {
            let key = key.as_ref();
            let Some(target) = locate(&out, parent, key, self.options.match_mode) else {
                tracing::debug!(key, "nothing to remove");
                continue;
            };
            let (adjacency, span) = span(&target.object, target.index);
            tracing::debug!(
                key,
                ?adjacency,
                start = span.start,
                end = span.end,
                removed = %bstr::BStr::new(&out[span.clone()]),
                "removing member"
            );
            out = Cow::Owned(excise(&out, span));
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                validate(&out, usize::MAX).is_ok(),
                "Internal error: removal left malformed JSON"
            );
        }
        out
    }
}
