use crate::validator::DEFAULT_MAX_DEPTH;

/// Configuration for a [`Remover`](crate::Remover).
///
/// # Examples
///
/// ```rust
/// use jsondrop::{MatchMode, RemoveOptions, Remover};
///
/// let remover = Remover::new(RemoveOptions {
///     match_mode: MatchMode::Descendant,
///     ..Default::default()
/// });
/// let out = remover.remove(br#"{"a":{"b":{"c":1,"d":2}}}"#, &["c"]).unwrap();
/// assert_eq!(&*out, br#"{"a":{"b":{"d":2}}}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RemoveOptions {
    /// How each path segment is matched against the document.
    ///
    /// # Default
    ///
    /// [`MatchMode::Direct`]
    pub match_mode: MatchMode,

    /// Maximum container nesting accepted by validation. Deeper documents are
    /// rejected with `exceeded max depth`.
    ///
    /// # Default
    ///
    /// `10_000`
    pub max_depth: usize,
}

impl Default for RemoveOptions {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How path segments are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchMode {
    /// Each segment names a direct member of the object reached by the
    /// previous segment, starting at the top-level object.
    #[default]
    Direct,
    /// Each segment names the first member with that key, in document order,
    /// at any depth beneath the value reached by the previous segment. Objects
    /// inside arrays are searched too.
    Descendant,
}
