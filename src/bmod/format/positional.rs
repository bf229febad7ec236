//! Fixed-stride lookup for tables without key/value structure.
//!
//! The Strong's transliteration table is a flat run of null-delimited
//! segments with no keys. Item `i` of a group sits `stride` segments after
//! item `i - 1`; the group table in [`PositionalLayout`] says where each
//! group starts. The layout was reverse engineered, so a buffer that is
//! shorter than the layout expects is reported instead of trusted silently.

use log::{debug, trace, warn};

use crate::bmod::codec::text;
use crate::bmod::types::models::{PositionalLayout, StrongsId, TransliterationRecord};

/// Lazily walks every group of a layout over pre-split segments.
#[derive(Debug, Clone)]
pub struct PositionalRecords<'a> {
    segments: Vec<&'a [u8]>,
    layout: &'a PositionalLayout,
    group: usize,
    item: u32,
}

impl<'a> PositionalRecords<'a> {
    pub fn new(segments: Vec<&'a [u8]>, layout: &'a PositionalLayout) -> Self {
        let expected = layout.expected_segments();
        if segments.len() < expected {
            warn!(
                "Positional table holds {} segments, layout expects {}; trailing items will be skipped",
                segments.len(),
                expected
            );
        } else {
            debug!(
                "Positional table: {} segments, stride {}, {} groups",
                segments.len(),
                layout.stride,
                layout.groups.len()
            );
        }
        Self {
            segments,
            layout,
            group: 0,
            item: 1,
        }
    }

    /// The segment holding item `item` (1-based) of group `group`.
    pub fn segment_at(&self, group: usize, item: u32) -> Option<&'a [u8]> {
        let offset = self.layout.offset_of(group, item)?;
        self.segments.get(offset).copied()
    }

    fn next_group(&mut self) {
        self.group += 1;
        self.item = 1;
    }
}

impl Iterator for PositionalRecords<'_> {
    type Item = TransliterationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let layout = self.layout;
        while let Some(group) = layout.groups.get(self.group) {
            let index = self.group;
            let item = self.item;
            if item > group.count {
                self.next_group();
                continue;
            }
            match item.checked_add(1) {
                Some(next) => self.item = next,
                None => self.next_group(),
            }

            let Some(bytes) = self.segment_at(index, item) else {
                // Offsets only grow within a group, so later items are out of range too.
                trace!("{}{} onward is past the end of the table", group.prefix.prefix(), item);
                if self.group == index {
                    self.next_group();
                }
                continue;
            };
            if let Some(text) = text::decode_field(bytes) {
                return Some(TransliterationRecord {
                    strongs_id: StrongsId::new(group.prefix, item),
                    text,
                });
            }
        }
        None
    }
}
