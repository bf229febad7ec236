//! Discovery of module files in a directory and the verse availability index.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::reader;
use super::sink::RecordSink;
use super::types::error::{Result, SinkError};
use super::types::formats::DecodeOptions;
use super::types::models::{ModuleCode, ModuleKind, Record, VerseId};

/// One recognised module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub path: PathBuf,
    pub kind: ModuleKind,
    pub code: ModuleCode,
}

/// The module files found in one directory, sorted by path.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    entries: Vec<ModuleEntry>,
}

impl ModuleCatalog {
    /// Lists the recognised module files directly inside `dir`.
    ///
    /// Files with unknown extensions are ignored. Subdirectories are not
    /// searched.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Scanning {} for modules", dir.display());

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(kind) = ModuleKind::from_path(&path) else {
                continue;
            };
            debug!("Found {} module {}", kind, path.display());
            entries.push(ModuleEntry {
                code: ModuleCode::from_path(&path),
                kind,
                path,
            });
        }
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        info!("Found {} modules in {}", entries.len(), dir.display());
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ModuleEntry] {
        &self.entries
    }

    pub fn by_kind(&self, kind: ModuleKind) -> impl Iterator<Item = &ModuleEntry> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decodes every module in path order into `sink`.
    pub fn decode_all<S: RecordSink + ?Sized>(&self, options: &DecodeOptions, sink: &mut S) -> Result<usize> {
        let mut total = 0;
        for entry in &self.entries {
            total += reader::decode_path(&entry.path, options, sink)?;
        }
        Ok(total)
    }
}

/// Which commentary modules have something to say about each verse.
///
/// Fed with records, it keeps only commentary entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityIndex {
    verses: BTreeMap<VerseId, BTreeSet<ModuleCode>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    pub fn insert(&mut self, record: &Record) {
        if let Record::Text(entry) = record {
            self.verses
                .entry(entry.key)
                .or_default()
                .insert(entry.module.clone());
        }
    }

    /// Module codes covering `verse`, sorted and without duplicates.
    pub fn modules_for(&self, verse: VerseId) -> Vec<&ModuleCode> {
        self.verses
            .get(&verse)
            .map(|codes| codes.iter().collect())
            .unwrap_or_default()
    }

    /// The comma-joined form, e.g. `ACC,MHC`.
    pub fn joined(&self, verse: VerseId) -> Option<String> {
        let codes = self.verses.get(&verse)?;
        Some(
            codes
                .iter()
                .map(ModuleCode::as_str)
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VerseId, &BTreeSet<ModuleCode>)> {
        self.verses.iter().map(|(verse, codes)| (*verse, codes))
    }
}

impl RecordSink for AvailabilityIndex {
    fn accept(&mut self, record: Record) -> std::result::Result<(), SinkError> {
        self.insert(&record);
        Ok(())
    }
}
