//! Key/value pairing over a segment stream.
//!
//! Two strategies are provided:
//! - [`StrictPairs`] takes segments two at a time. Commentary and lexicon
//!   files interleave keys and values without noise.
//! - [`HeuristicPairs`] classifies every candidate with a [`KeyShape`] and
//!   resynchronises after stray empty segments. Dictionary files need it.

use std::fmt;
use std::iter::Peekable;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::bmod::codec::text;

/// Groups segments into consecutive `(key, value)` pairs.
///
/// A dangling final segment without a partner is discarded.
#[derive(Debug, Clone)]
pub struct StrictPairs<I> {
    segments: I,
}

impl<I> StrictPairs<I> {
    pub fn new(segments: I) -> Self {
        Self { segments }
    }
}

impl<'a, I> Iterator for StrictPairs<I>
where
    I: Iterator<Item = &'a [u8]>,
{
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.segments.next()?;
        let value = self.segments.next()?;
        Some((key, value))
    }
}

/// Decides whether decoded text can stand in key position.
///
/// Keys are short single-line labels. Anything longer than `max_chars`
/// characters, or holding a line break, is body text that drifted out of
/// place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyShape {
    pub max_chars: usize,
}

impl KeyShape {
    pub const DEFAULT_MAX_CHARS: usize = 100;

    pub fn accepts(&self, candidate: &str) -> bool {
        candidate.chars().count() <= self.max_chars
            && !candidate.contains(['\r', '\n'])
    }
}

impl Default for KeyShape {
    fn default() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
        }
    }
}

/// Recovers `(key, value)` pairs from a stream whose alignment drifts.
///
/// Yields decoded, trimmed text. Empty candidates and misshapen keys are
/// skipped one segment at a time; a key followed by an empty value is
/// dropped and the value slot is re-examined as the next key. Values are
/// never reassembled from several segments.
pub struct HeuristicPairs<I: Iterator> {
    segments: Peekable<I>,
    shape: KeyShape,
}

impl<I> fmt::Debug for HeuristicPairs<I>
where
    I: Iterator + fmt::Debug,
    I::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeuristicPairs")
            .field("segments", &self.segments)
            .field("shape", &self.shape)
            .finish()
    }
}

impl<I> Clone for HeuristicPairs<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            shape: self.shape,
        }
    }
}

impl<'a, I> HeuristicPairs<I>
where
    I: Iterator<Item = &'a [u8]>,
{
    pub fn new(segments: I) -> Self {
        Self::with_shape(segments, KeyShape::default())
    }

    pub fn with_shape(segments: I, shape: KeyShape) -> Self {
        Self {
            segments: segments.peekable(),
            shape,
        }
    }
}

impl<'a, I> Iterator for HeuristicPairs<I>
where
    I: Iterator<Item = &'a [u8]>,
{
    type Item = (String, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some(key) = text::decode_field(self.segments.next()?) else {
                continue;
            };
            if !self.shape.accepts(&key) {
                trace!("Skipping segment in key position ({} chars)", key.chars().count());
                continue;
            }

            let candidate = *self.segments.peek()?;
            match text::decode_field(candidate) {
                Some(value) => {
                    self.segments.next();
                    return Some((key, value));
                }
                None => {
                    trace!("Dropping key {:?}: empty value", key);
                }
            }
        }
    }
}
