//! # bmod-reader
//!
//! A decoder for the null-delimited module containers of a legacy bible
//! study application: bibles (`.bt4`), commentaries (`.ct4`), dictionaries
//! (`.dt4`), Strong's lexicons (`.hx4`, `.gx4`), cross-reference tables
//! (`.xr4`) and the positional transliteration table (`.sd2`), plus
//! interlinear sources annotated with Strong's markers.
//!
//! Decoding is best effort: malformed entries are skipped one record at a
//! time and only a failure to read the file aborts.
pub mod bmod;

// Re-export the main types for convenience
pub use bmod::{
    catalog::{AvailabilityIndex, ModuleCatalog, ModuleEntry},
    reader::{decode_path, ModuleReader},
    sink::{drain_into, RecordSink},
    types::{
        error::{BmodError, Result, SinkError, UnresolvableKey},
        formats::{
            Bible, Commentary, CrossReferences, DecodeOptions, Dictionary, Interlinear, Lexicon,
            ModuleFormat, Transliterations,
        },
        models::{
            CrossReferenceEdge, DictionaryRecord, Identifier, InterlinearToken, InterlinearVerse,
            LexiconRecord, ModuleCode, ModuleKind, PositionalGroup, PositionalLayout, Record,
            StrongsId, StrongsTag, Testament, TextRecord, TransliterationRecord, VerseId,
            VerseRecord,
        },
    },
};
