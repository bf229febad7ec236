//! Specialization logic for the module container formats.
//!
//! Each format is a zero-sized marker implementing [`ModuleFormat`]. The
//! marker names the file kinds it reads and builds the lazy record
//! iterator for a loaded buffer.

use serde::{Deserialize, Serialize};

use super::models::{ModuleCode, ModuleKind, PositionalLayout};
use crate::bmod::format::pairing::KeyShape;
use crate::bmod::iter::{
    CommentaryRecords, CrossReferenceRecords, DictionaryRecords, InterlinearRecords, LexiconRecords,
    TransliterationRecords, VerseRecords,
};

/// Tunables shared by every decode. Read-only during decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeOptions {
    #[serde(default)]
    pub layout: PositionalLayout,
    #[serde(default)]
    pub key_shape: KeyShape,
}

/// A borrowed view of one loaded module.
#[derive(Debug, Clone, Copy)]
pub struct ModuleSource<'a> {
    pub code: &'a ModuleCode,
    pub kind: ModuleKind,
    pub data: &'a [u8],
    pub options: &'a DecodeOptions,
}

/// A trait that defines how one container format is decoded.
pub trait ModuleFormat {
    /// A short name used for debugging and logging.
    const DEBUG_NAME: &'static str;

    /// The module kinds stored in this format.
    const KINDS: &'static [ModuleKind];

    /// Lazy iterator over the records of one buffer.
    type Records<'a>: Iterator<Item = super::models::Record>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_>;
}

/// Marker for bible text files (`.bt4`).
#[derive(Debug)]
pub struct Bible;

impl ModuleFormat for Bible {
    const DEBUG_NAME: &'static str = "BIBLE";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::Bible];
    type Records<'a> = VerseRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        VerseRecords::new(source.data)
    }
}

/// Marker for commentary files (`.ct4`).
#[derive(Debug)]
pub struct Commentary;

impl ModuleFormat for Commentary {
    const DEBUG_NAME: &'static str = "COMMENTARY";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::Commentary];
    type Records<'a> = CommentaryRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        CommentaryRecords::new(source.data, source.code)
    }
}

/// Marker for dictionary files (`.dt4`).
#[derive(Debug)]
pub struct Dictionary;

impl ModuleFormat for Dictionary {
    const DEBUG_NAME: &'static str = "DICTIONARY";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::Dictionary];
    type Records<'a> = DictionaryRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        DictionaryRecords::new(source.data, source.code, source.options.key_shape)
    }
}

/// Marker for Strong's lexicons (`.hx4` Hebrew, `.gx4` Greek).
#[derive(Debug)]
pub struct Lexicon;

impl ModuleFormat for Lexicon {
    const DEBUG_NAME: &'static str = "LEXICON";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::HebrewLexicon, ModuleKind::GreekLexicon];
    type Records<'a> = LexiconRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        let testament = source
            .kind
            .testament()
            .unwrap_or(super::models::Testament::Hebrew);
        LexiconRecords::new(source.data, testament)
    }
}

/// Marker for cross-reference tables (`.xr4`).
#[derive(Debug)]
pub struct CrossReferences;

impl ModuleFormat for CrossReferences {
    const DEBUG_NAME: &'static str = "XREF";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::CrossReferences];
    type Records<'a> = CrossReferenceRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        CrossReferenceRecords::new(source.data)
    }
}

/// Marker for the positional Strong's transliteration table (`.sd2`).
#[derive(Debug)]
pub struct Transliterations;

impl ModuleFormat for Transliterations {
    const DEBUG_NAME: &'static str = "TRANSLIT";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::Transliterations];
    type Records<'a> = TransliterationRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        TransliterationRecords::new(source.data, &source.options.layout)
    }
}

/// Marker for interlinear sources (`.itl`): one annotated verse per line.
#[derive(Debug)]
pub struct Interlinear;

impl ModuleFormat for Interlinear {
    const DEBUG_NAME: &'static str = "INTERLINEAR";
    const KINDS: &'static [ModuleKind] = &[ModuleKind::Interlinear];
    type Records<'a> = InterlinearRecords<'a>;

    fn records(source: ModuleSource<'_>) -> Self::Records<'_> {
        InterlinearRecords::new(source.data)
    }
}
