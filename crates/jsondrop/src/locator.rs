//! Path descent over validated input.
//!
//! [`locate`] walks the path one segment at a time and returns the object
//! that encloses the final key together with that key's member index. A
//! missing segment, or a segment whose value cannot be descended into, is not
//! an error: the caller treats `None` as "nothing to remove".

use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    cursor::{Cursor, ObjectView},
    key::key_matches,
    options::MatchMode,
};

/// The member selected for removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Target {
    pub object: ObjectView,
    pub index: usize,
}

/// Finds the member named `key` beneath the objects named by `parents`.
pub(crate) fn locate<K: AsRef<str>>(
    bytes: &[u8],
    parents: &[K],
    key: &str,
    mode: MatchMode,
) -> Option<Target> {
    let mut cursor = Cursor::new(bytes, 0);
    if cursor.skip_ws() != Some(b'{') {
        tracing::trace!("top-level value is not an object");
        return None;
    }
    let root = cursor.skip_value()?;

    match mode {
        MatchMode::Direct => locate_direct(bytes, root, parents, key),
        MatchMode::Descendant => locate_descendant(bytes, root, parents, key),
    }
}

fn locate_direct<K: AsRef<str>>(
    bytes: &[u8],
    root: Range<usize>,
    parents: &[K],
    key: &str,
) -> Option<Target> {
    let mut open = root.start;
    for segment in parents {
        let segment = segment.as_ref();
        let object = ObjectView::scan(bytes, open)?;
        let Some(index) = object.find(bytes, segment) else {
            tracing::trace!(segment, "path segment not found");
            return None;
        };
        let value = &object.members[index].value;
        if bytes[value.start] != b'{' {
            tracing::trace!(segment, "path segment is not an object");
            return None;
        }
        open = value.start;
    }

    let object = ObjectView::scan(bytes, open)?;
    let Some(index) = object.find(bytes, key) else {
        tracing::trace!(key, "key not found");
        return None;
    };
    Some(Target { object, index })
}

fn locate_descendant<K: AsRef<str>>(
    bytes: &[u8],
    root: Range<usize>,
    parents: &[K],
    key: &str,
) -> Option<Target> {
    let mut scope = root;
    for segment in parents {
        let segment = segment.as_ref();
        let Some(found) = find_descendant(bytes, scope.clone(), segment) else {
            tracing::trace!(segment, "path segment not found");
            return None;
        };
        let value = found.object.members[found.index].value.clone();
        if !matches!(bytes[value.start], b'{' | b'[') {
            tracing::trace!(segment, "path segment is not a container");
            return None;
        }
        scope = value;
    }

    let found = find_descendant(bytes, scope, key);
    if found.is_none() {
        tracing::trace!(key, "key not found");
    }
    found
}

/// Finds the first member named `segment`, by key position, anywhere inside
/// the container spanning `scope`.
///
/// The walk is a single forward pass that tracks which open containers are
/// objects and whether the next string in the innermost one is a key.
fn find_descendant(bytes: &[u8], scope: Range<usize>, segment: &str) -> Option<Target> {
    // Offsets of the open containers; `true` marks objects.
    let mut open: Vec<(usize, bool)> = Vec::new();
    let mut expect_key = false;
    let mut cursor = Cursor::new(bytes, scope.start);

    while cursor.pos() < scope.end {
        let pos = cursor.pos();
        match bytes[pos] {
            b'"' => {
                let string = cursor.skip_string()?;
                if expect_key {
                    expect_key = false;
                    let raw = &bytes[string.start + 1..string.end - 1];
                    if key_matches(raw, segment) {
                        let &(object_open, _) = open.last()?;
                        let object = ObjectView::scan(bytes, object_open)?;
                        let index = object
                            .members
                            .iter()
                            .position(|member| member.key.start == string.start)?;
                        return Some(Target { object, index });
                    }
                }
                continue;
            }
            b'{' => {
                open.push((pos, true));
                expect_key = true;
            }
            b'[' => {
                open.push((pos, false));
                expect_key = false;
            }
            b'}' | b']' => {
                open.pop();
                expect_key = false;
            }
            b',' => expect_key = matches!(open.last(), Some((_, true))),
            _ => {}
        }
        cursor = Cursor::new(bytes, pos + 1);
    }
    None
}
