//! Deletion spans and buffer reassembly.
//!
//! Removing a member must also remove exactly one of the commas around it so
//! the object stays valid. Which one depends on where the member sits:
//!
//! | position         | branch                        | deleted                                  |
//! |------------------|-------------------------------|------------------------------------------|
//! | has a successor  | [`Adjacency::FollowingComma`] | key start .. successor's key start       |
//! | last of several  | [`Adjacency::PrecedingComma`] | predecessor's value end .. own value end |
//! | only member      | [`Adjacency::Sole`]           | key start .. closing brace               |
//!
//! Each branch leaves every kept member followed by the separator it had in
//! the input, except the last kept member, which is followed by the whitespace
//! that preceded the closing brace. The result therefore depends only on which
//! members remain, never on the order of removals.

use alloc::vec::Vec;
use core::ops::Range;

use crate::cursor::ObjectView;

/// Which separator a removal consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Adjacency {
    /// A sibling follows; the comma after the value goes.
    FollowingComma,
    /// Last of several members; the comma before the key goes.
    PrecedingComma,
    /// No siblings; the object is left empty.
    Sole,
}

/// Computes the span that removes member `index` of `object`.
pub(crate) fn span(object: &ObjectView, index: usize) -> (Adjacency, Range<usize>) {
    let members = &object.members;
    let member = &members[index];
    if let Some(next) = members.get(index + 1) {
        (Adjacency::FollowingComma, member.key.start..next.key.start)
    } else if let Some(prev) = index.checked_sub(1).map(|i| &members[i]) {
        (Adjacency::PrecedingComma, prev.value.end..member.value.end)
    } else {
        (Adjacency::Sole, member.key.start..object.close)
    }
}

/// Copies `bytes` with `span` cut out.
pub(crate) fn excise(bytes: &[u8], span: Range<usize>) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() - span.len());
    out.extend_from_slice(&bytes[..span.start]);
    out.extend_from_slice(&bytes[span.end..]);
    out
}
