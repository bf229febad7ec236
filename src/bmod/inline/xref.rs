//! Cross-reference value expansion.
//!
//! A value wraps each target in the `0x03` control marker:
//!
//! ```text
//! \x03 36C0 \x03 \x03 3825-3827 \x03
//! ```
//!
//! Every token resolves to one id or a range of ids, and each id becomes an
//! edge from the record's key.

use log::trace;

use crate::bmod::codec::hex::HexKey;
use crate::bmod::types::models::{CrossReferenceEdge, VerseId};

/// Control byte wrapping each reference token.
pub const REFERENCE_MARKER: char = '\x03';

/// Tokens that sit strictly between two markers, trimmed and non-empty.
///
/// Text before the first marker or after the last is not a reference.
pub fn reference_tokens(value: &str) -> impl Iterator<Item = &str> {
    let mut pieces: Vec<&str> = value.split(REFERENCE_MARKER).collect();
    if !pieces.is_empty() {
        pieces.remove(0);
    }
    pieces.pop();
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolves every token of `value`, dropping the ones that fail.
pub fn expand_targets(value: &str) -> Vec<VerseId> {
    reference_tokens(value)
        .filter_map(|token| match HexKey::parse(token) {
            Ok(key) => Some(key.ids()),
            Err(e) => {
                trace!("Skipping cross-reference token {:?}: {}", token, e);
                None
            }
        })
        .flatten()
        .collect()
}

/// Expands `value` into edges from `from`, in token order.
pub fn expand(from: VerseId, value: &str) -> Vec<CrossReferenceEdge> {
    expand_targets(value)
        .into_iter()
        .map(|to| CrossReferenceEdge { from, to })
        .collect()
}
