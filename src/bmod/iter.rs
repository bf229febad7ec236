//! Lazy record iterators, one per container format.
//!
//! Every iterator borrows the module buffer and yields [`Record`]s in
//! source order. Anything that cannot become a complete record is skipped
//! and logged at `trace` level; iteration itself never fails.
//!
//! # Example
//! ```no_run
//! # use bmod_reader::{Commentary, ModuleReader};
//! # let reader = ModuleReader::<Commentary>::open("MHC.ct4").unwrap();
//! for record in reader.iter_records() {
//!     println!("{:?}", record);
//! }
//! ```

use std::iter::Enumerate;
use std::vec::IntoIter;

use log::trace;

use super::codec::{hex, text};
use super::format::pairing::{HeuristicPairs, KeyShape, StrictPairs};
use super::format::positional::PositionalRecords;
use super::format::segment::{self, Segments};
use super::inline::{interlinear, xref};
use super::types::models::*;

/// Verses of a bible file, numbered by position from 1.
///
/// Empty verses are skipped but still take their number.
#[derive(Debug, Clone)]
pub struct VerseRecords<'a> {
    segments: Enumerate<Segments<'a>>,
}

impl<'a> VerseRecords<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            segments: segment::segments(data).enumerate(),
        }
    }
}

impl Iterator for VerseRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        for (index, bytes) in self.segments.by_ref() {
            let Ok(verse_id) = VerseId::try_from(index + 1) else {
                return None;
            };
            match text::decode_field(bytes) {
                Some(text) => return Some(Record::Verse(VerseRecord { verse_id, text })),
                None => trace!("Verse {} is empty", verse_id),
            }
        }
        None
    }
}

/// Commentary entries: strict `(hex verse id, text)` pairs.
#[derive(Debug, Clone)]
pub struct CommentaryRecords<'a> {
    pairs: StrictPairs<Segments<'a>>,
    module: &'a ModuleCode,
}

impl<'a> CommentaryRecords<'a> {
    pub fn new(data: &'a [u8], module: &'a ModuleCode) -> Self {
        Self {
            pairs: StrictPairs::new(segment::segments(data)),
            module,
        }
    }
}

impl Iterator for CommentaryRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        for (key_bytes, value_bytes) in self.pairs.by_ref() {
            let (Some(key_text), Some(text)) = (text::decode_field(key_bytes), text::decode_field(value_bytes)) else {
                continue;
            };
            match hex::resolve(&key_text) {
                Ok(key) => {
                    return Some(Record::Text(TextRecord {
                        key,
                        text,
                        module: self.module.clone(),
                    }));
                }
                Err(e) => trace!("Skipping {} entry: {}", self.module, e),
            }
        }
        None
    }
}

/// Dictionary topics recovered with the heuristic pairer.
#[derive(Debug, Clone)]
pub struct DictionaryRecords<'a> {
    pairs: HeuristicPairs<Segments<'a>>,
    module: &'a ModuleCode,
}

impl<'a> DictionaryRecords<'a> {
    pub fn new(data: &'a [u8], module: &'a ModuleCode, shape: KeyShape) -> Self {
        Self {
            pairs: HeuristicPairs::with_shape(segment::segments(data), shape),
            module,
        }
    }
}

impl Iterator for DictionaryRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        let (topic, definition) = self.pairs.next()?;
        Some(Record::Dictionary(DictionaryRecord {
            topic,
            definition,
            module: self.module.clone(),
        }))
    }
}

/// Lexicon definitions keyed by decimal Strong's numbers (`01`, `7225`).
#[derive(Debug, Clone)]
pub struct LexiconRecords<'a> {
    pairs: StrictPairs<Segments<'a>>,
    testament: Testament,
}

impl<'a> LexiconRecords<'a> {
    pub fn new(data: &'a [u8], testament: Testament) -> Self {
        Self {
            pairs: StrictPairs::new(segment::segments(data)),
            testament,
        }
    }

    fn strongs_number(key: &str) -> Option<u32> {
        if !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        key.parse::<u32>().ok().filter(|n| *n > 0)
    }
}

impl Iterator for LexiconRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        for (key_bytes, value_bytes) in self.pairs.by_ref() {
            let (Some(key), Some(definition)) = (text::decode_field(key_bytes), text::decode_field(value_bytes)) else {
                continue;
            };
            let Some(number) = Self::strongs_number(&key) else {
                trace!("Skipping lexicon entry with key {:?}", key);
                continue;
            };
            return Some(Record::Lexicon(LexiconRecord {
                strongs_id: StrongsId::new(self.testament, number),
                definition: definition.replace("\r\n", "\n"),
            }));
        }
        None
    }
}

/// Cross-reference edges from a key-carrying segment scan.
///
/// A segment starting with the reference marker is a value for the current
/// key; any other non-empty segment replaces the key. While the current
/// key is unresolvable its values are dropped.
#[derive(Debug, Clone)]
pub struct CrossReferenceRecords<'a> {
    segments: Segments<'a>,
    current_key: Option<VerseId>,
    pending: IntoIter<CrossReferenceEdge>,
}

impl<'a> CrossReferenceRecords<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            segments: segment::segments(data),
            current_key: None,
            pending: Vec::new().into_iter(),
        }
    }
}

impl Iterator for CrossReferenceRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edge) = self.pending.next() {
                return Some(Record::CrossReference(edge));
            }

            let bytes = self.segments.next()?;
            if bytes.is_empty() {
                continue;
            }

            if bytes[0] == xref::REFERENCE_MARKER as u8 {
                match self.current_key {
                    Some(from) => {
                        let value = text::decode_text(bytes);
                        self.pending = xref::expand(from, &value).into_iter();
                    }
                    None => trace!("Dropping cross-reference value without a key"),
                }
                continue;
            }

            self.current_key = text::decode_field(bytes).and_then(|key| match hex::resolve(&key) {
                Ok(id) => Some(id),
                Err(e) => {
                    trace!("Unresolvable cross-reference key: {}", e);
                    None
                }
            });
        }
    }
}

/// Transliterations looked up by position.
#[derive(Debug, Clone)]
pub struct TransliterationRecords<'a> {
    inner: PositionalRecords<'a>,
}

impl<'a> TransliterationRecords<'a> {
    pub fn new(data: &'a [u8], layout: &'a PositionalLayout) -> Self {
        Self {
            inner: PositionalRecords::new(segment::segments(data).collect(), layout),
        }
    }
}

impl Iterator for TransliterationRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Record::Transliteration)
    }
}

/// Interlinear verses, one `verse_id<TAB>annotated text` line each.
///
/// Lines are UTF-8. A line without markers inherits the testament of the
/// last line that had some, so untagged words of a Greek book stay `G0`.
#[derive(Debug, Clone)]
pub struct InterlinearRecords<'a> {
    lines: Segments<'a>,
    testament: Testament,
}

impl<'a> InterlinearRecords<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            lines: Segments::new(data, b'\n'),
            testament: Testament::Hebrew,
        }
    }
}

impl Iterator for InterlinearRecords<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        for line in self.lines.by_ref() {
            let line = String::from_utf8_lossy(line);
            let Some((id, body)) = line.trim().split_once('\t') else {
                continue;
            };
            let Ok(verse_id) = id.trim().parse::<VerseId>() else {
                trace!("Skipping interlinear line with id {:?}", id);
                continue;
            };
            if let Some(testament) = interlinear::marker_testament(body) {
                self.testament = testament;
            }
            let tokens = interlinear::align_for(body, self.testament);
            if !tokens.is_empty() {
                return Some(Record::Interlinear(InterlinearVerse { verse_id, tokens }));
            }
        }
        None
    }
}
