//! Core data structures for decoded module content.
//!
//! This module defines the fundamental types used throughout the library:
//! - Identifiers (verse ids, Strong's numbers, module codes)
//! - The record variants handed to a sink
//! - The positional layout used for delimiter-free tables

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{BmodError, Result, UnresolvableKey};

/// Integer key resolved from a hexadecimal ASCII identifier.
pub type Identifier = u32;

/// Canonical book/chapter/verse locator. Opaque to the decoder.
pub type VerseId = u32;

/// The source-language alphabet of a Strong's number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Testament {
    /// Old Testament, `H` prefix.
    Hebrew,
    /// New Testament, `G` prefix.
    Greek,
}

impl Testament {
    pub fn prefix(self) -> char {
        match self {
            Testament::Hebrew => 'H',
            Testament::Greek => 'G',
        }
    }

    pub fn from_prefix(c: char) -> Option<Self> {
        match c {
            'H' => Some(Testament::Hebrew),
            'G' => Some(Testament::Greek),
            _ => None,
        }
    }
}

/// A Strong's number such as `H7225` or `G3056`.
///
/// Number `0` is the sentinel meaning "no annotation" (`H0`/`G0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StrongsId {
    pub testament: Testament,
    pub number: u32,
}

/// Strong's tags attached to interlinear words share the identifier type.
pub type StrongsTag = StrongsId;

impl StrongsId {
    pub fn new(testament: Testament, number: u32) -> Self {
        Self { testament, number }
    }

    /// The "no annotation" tag for a testament.
    pub fn sentinel(testament: Testament) -> Self {
        Self { testament, number: 0 }
    }

    pub fn is_sentinel(&self) -> bool {
        self.number == 0
    }
}

impl fmt::Display for StrongsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.testament.prefix(), self.number)
    }
}

impl FromStr for StrongsId {
    type Err = UnresolvableKey;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(UnresolvableKey::Empty)?;
        let testament = Testament::from_prefix(first).ok_or_else(|| UnresolvableKey::InvalidCharacter {
            key: s.to_string(),
            found: first,
        })?;
        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(UnresolvableKey::Empty);
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(UnresolvableKey::InvalidCharacter {
                key: s.to_string(),
                found: bad,
            });
        }
        let number = digits
            .parse::<u32>()
            .map_err(|_| UnresolvableKey::Overflow(s.to_string()))?;
        Ok(Self { testament, number })
    }
}

impl TryFrom<String> for StrongsId {
    type Error = UnresolvableKey;
    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StrongsId> for String {
    fn from(id: StrongsId) -> Self {
        id.to_string()
    }
}

/// Short uppercase name of the module a record came from (`MHC`, `EASTON`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleCode(String);

impl ModuleCode {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_uppercase())
    }

    /// Derives the code from a file's base name, up to the first `.`.
    pub fn from_path(path: &Path) -> Self {
        let base = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = base.split('.').next().unwrap_or_default();
        Self::new(stem)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of container a module file holds, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Bible,
    Commentary,
    Dictionary,
    HebrewLexicon,
    GreekLexicon,
    CrossReferences,
    Transliterations,
    Interlinear,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 8] = [
        ModuleKind::Bible,
        ModuleKind::Commentary,
        ModuleKind::Dictionary,
        ModuleKind::HebrewLexicon,
        ModuleKind::GreekLexicon,
        ModuleKind::CrossReferences,
        ModuleKind::Transliterations,
        ModuleKind::Interlinear,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ModuleKind::Bible => "bt4",
            ModuleKind::Commentary => "ct4",
            ModuleKind::Dictionary => "dt4",
            ModuleKind::HebrewLexicon => "hx4",
            ModuleKind::GreekLexicon => "gx4",
            ModuleKind::CrossReferences => "xr4",
            ModuleKind::Transliterations => "sd2",
            ModuleKind::Interlinear => "itl",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.extension().eq_ignore_ascii_case(ext))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Testament implied by the module kind, for lexicons.
    pub fn testament(self) -> Option<Testament> {
        match self {
            ModuleKind::HebrewLexicon => Some(Testament::Hebrew),
            ModuleKind::GreekLexicon => Some(Testament::Greek),
            _ => None,
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModuleKind::Bible => "bible",
            ModuleKind::Commentary => "commentary",
            ModuleKind::Dictionary => "dictionary",
            ModuleKind::HebrewLexicon => "hebrew lexicon",
            ModuleKind::GreekLexicon => "greek lexicon",
            ModuleKind::CrossReferences => "cross references",
            ModuleKind::Transliterations => "transliterations",
            ModuleKind::Interlinear => "interlinear",
        };
        f.write_str(name)
    }
}

/// A commentary entry keyed by verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub key: Identifier,
    pub text: String,
    pub module: ModuleCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryRecord {
    pub topic: String,
    pub definition: String,
    pub module: ModuleCode,
}

/// A lexicon definition keyed by Strong's number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconRecord {
    pub strongs_id: StrongsId,
    pub definition: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CrossReferenceEdge {
    pub from: VerseId,
    pub to: VerseId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransliterationRecord {
    pub strongs_id: StrongsId,
    pub text: String,
}

/// One bible verse; `verse_id` is its 1-based position in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    pub verse_id: VerseId,
    pub text: String,
}

/// A translated word and the Strong's tag it renders.
///
/// Untagged words carry the testament's sentinel (`H0`/`G0`), never nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlinearToken {
    pub word: String,
    pub tag: StrongsTag,
}

impl InterlinearToken {
    /// The tag, unless it is the sentinel.
    pub fn lexical_tag(&self) -> Option<StrongsTag> {
        (!self.tag.is_sentinel()).then_some(self.tag)
    }
}

/// The aligned token sequence of one verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterlinearVerse {
    pub verse_id: VerseId,
    pub tokens: Vec<InterlinearToken>,
}

/// A decoded record, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Record {
    Text(TextRecord),
    Dictionary(DictionaryRecord),
    Lexicon(LexiconRecord),
    CrossReference(CrossReferenceEdge),
    Transliteration(TransliterationRecord),
    Verse(VerseRecord),
    Interlinear(InterlinearVerse),
}

/// One contiguous run of fixed-stride items in a positional table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalGroup {
    pub prefix: Testament,
    /// Segment number of the group's first item.
    pub base_offset: usize,
    pub count: u32,
}

/// Stride and group table for delimiter-free sequential data.
///
/// Offsets count null-delimited segments, empty ones included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalLayout {
    pub stride: usize,
    pub groups: Vec<PositionalGroup>,
}

/// Hebrew entries in the Strong's transliteration table.
pub const HEBREW_STRONGS_COUNT: u32 = 8675;
/// Greek entries in the Strong's transliteration table.
pub const GREEK_STRONGS_COUNT: u32 = 5625;
/// Segments per transliteration item.
pub const STRONGS_STRIDE: usize = 3;

impl PositionalLayout {
    /// Lays groups out back to back: the first starts at `stride`, each next
    /// one right after the previous group's last item.
    ///
    /// Offsets saturate instead of wrapping; [`validate`](Self::validate)
    /// rejects the result.
    pub fn contiguous(stride: usize, groups: &[(Testament, u32)]) -> Self {
        let mut base_offset = stride;
        let groups = groups
            .iter()
            .map(|&(prefix, count)| {
                let group = PositionalGroup { prefix, base_offset, count };
                base_offset = base_offset.saturating_add((count as usize).saturating_mul(stride));
                group
            })
            .collect();
        Self { stride, groups }
    }

    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(BmodError::InvalidLayout("stride must be positive".to_string()));
        }
        if self.groups.is_empty() {
            return Err(BmodError::InvalidLayout("no groups defined".to_string()));
        }
        for group in self.groups.iter().filter(|g| g.count > 0) {
            if self.last_offset(group).and_then(|end| end.checked_add(1)).is_none() {
                return Err(BmodError::InvalidLayout(format!(
                    "{} group of {} items overflows the segment index",
                    group.prefix.prefix(),
                    group.count
                )));
            }
        }
        Ok(())
    }

    /// Segment number of item `item` (1-based) in group `group`.
    ///
    /// `None` when the item is outside the group or its offset overflows.
    pub fn offset_of(&self, group: usize, item: u32) -> Option<usize> {
        let group = self.groups.get(group)?;
        if item == 0 || item > group.count {
            return None;
        }
        let step = (item as usize - 1).checked_mul(self.stride)?;
        group.base_offset.checked_add(step)
    }

    fn last_offset(&self, group: &PositionalGroup) -> Option<usize> {
        let span = (group.count.checked_sub(1)? as usize).checked_mul(self.stride)?;
        group.base_offset.checked_add(span)
    }

    /// Number of segments a buffer needs to hold every item of every group.
    ///
    /// Saturates at `usize::MAX` for layouts that fail validation.
    pub fn expected_segments(&self) -> usize {
        self.groups
            .iter()
            .filter(|g| g.count > 0)
            .map(|g| self.last_offset(g).map_or(usize::MAX, |end| end.saturating_add(1)))
            .max()
            .unwrap_or(0)
    }
}

impl Default for PositionalLayout {
    fn default() -> Self {
        Self::contiguous(
            STRONGS_STRIDE,
            &[
                (Testament::Hebrew, HEBREW_STRONGS_COUNT),
                (Testament::Greek, GREEK_STRONGS_COUNT),
            ],
        )
    }
}
