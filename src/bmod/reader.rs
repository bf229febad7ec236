use std::fs;
use std::marker::PhantomData;
use std::path::Path;

use log::{debug, info};

use super::sink::{self, RecordSink};
use super::types::error::{BmodError, Result};
use super::types::formats::*;
use super::types::models::*;

/// The main reader for module files.
///
/// Holds the whole file in memory; every call to [`iter_records`](Self::iter_records)
/// decodes it afresh, so repeated decodes yield identical sequences.
#[derive(Debug)]
pub struct ModuleReader<T: ModuleFormat> {
    pub code: ModuleCode,
    pub kind: ModuleKind,
    data: Vec<u8>,
    options: DecodeOptions,
    _format: PhantomData<T>,
}

impl<T: ModuleFormat> ModuleReader<T> {
    /// Reads a module file from the given path.
    ///
    /// The module code is the upper-cased base name (`MHC.ct4` → `MHC`).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The extension does not name one of `T`'s module kinds
    /// - The file cannot be read
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kind = ModuleKind::from_path(path)
            .filter(|kind| T::KINDS.contains(kind))
            .ok_or_else(|| {
                BmodError::UnsupportedModule(format!("{} is not a {} module", path.display(), T::DEBUG_NAME))
            })?;
        info!("Opening {} module: {}", kind, path.display());
        let data = fs::read(path)?;
        Self::from_bytes(ModuleCode::from_path(path), kind, data)
    }

    /// Wraps an in-memory buffer.
    ///
    /// # Errors
    /// Returns [`BmodError::UnsupportedModule`] if `kind` is not stored in format `T`.
    pub fn from_bytes(code: ModuleCode, kind: ModuleKind, data: Vec<u8>) -> Result<Self> {
        if !T::KINDS.contains(&kind) {
            return Err(BmodError::UnsupportedModule(format!(
                "{} module {} is not a {} module",
                kind,
                code,
                T::DEBUG_NAME
            )));
        }
        debug!("{} module {}: {} bytes", T::DEBUG_NAME, code, data.len());
        Ok(Self {
            code,
            kind,
            data,
            options: DecodeOptions::default(),
            _format: PhantomData,
        })
    }

    /// Replaces the decode options.
    ///
    /// # Errors
    /// Returns [`BmodError::InvalidLayout`] if the positional layout is unusable.
    pub fn with_options(mut self, options: DecodeOptions) -> Result<Self> {
        options.layout.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Replaces only the positional layout.
    pub fn with_layout(self, layout: PositionalLayout) -> Result<Self> {
        let key_shape = self.options.key_shape;
        self.with_options(DecodeOptions { layout, key_shape })
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// The raw module bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn source(&self) -> ModuleSource<'_> {
        ModuleSource {
            code: &self.code,
            kind: self.kind,
            data: &self.data,
            options: &self.options,
        }
    }

    /// Returns a lazy iterator over every record, in source order.
    pub fn iter_records(&self) -> T::Records<'_> {
        T::records(self.source())
    }

    /// Forwards every record to `sink`, returning how many were accepted.
    ///
    /// Stops at the first sink error.
    pub fn decode_into<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let count = sink::drain_into(self.iter_records(), sink)?;
        info!("{} module {}: {} records decoded", T::DEBUG_NAME, self.code, count);
        Ok(count)
    }
}

fn decode_with<T: ModuleFormat, S: RecordSink + ?Sized>(
    path: &Path,
    options: &DecodeOptions,
    sink: &mut S,
) -> Result<usize> {
    ModuleReader::<T>::open(path)?
        .with_options(options.clone())?
        .decode_into(sink)
}

/// Decodes any recognised module file, choosing the format from its extension.
pub fn decode_path<S: RecordSink + ?Sized>(
    path: impl AsRef<Path>,
    options: &DecodeOptions,
    sink: &mut S,
) -> Result<usize> {
    let path = path.as_ref();
    let kind = ModuleKind::from_path(path)
        .ok_or_else(|| BmodError::UnsupportedModule(path.display().to_string()))?;
    match kind {
        ModuleKind::Bible => decode_with::<Bible, S>(path, options, sink),
        ModuleKind::Commentary => decode_with::<Commentary, S>(path, options, sink),
        ModuleKind::Dictionary => decode_with::<Dictionary, S>(path, options, sink),
        ModuleKind::HebrewLexicon | ModuleKind::GreekLexicon => decode_with::<Lexicon, S>(path, options, sink),
        ModuleKind::CrossReferences => decode_with::<CrossReferences, S>(path, options, sink),
        ModuleKind::Transliterations => decode_with::<Transliterations, S>(path, options, sink),
        ModuleKind::Interlinear => decode_with::<Interlinear, S>(path, options, sink),
    }
}
