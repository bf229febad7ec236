//! Core module container decoder.
//!
//! # Module Organization
//!
//! - [`types`]: Records, identifiers, configuration, errors and format markers
//! - [`codec`]: Text and hex identifier decoding
//! - [`format`]: Segmenting, pairing and positional lookup over raw buffers
//! - [`inline`]: Interlinear alignment and cross-reference expansion
//! - [`reader`]: Loads a module file and drives its record iterator
//! - [`sink`]: The destination contract for decoded records
//! - [`catalog`]: Directory scanning and the verse availability index

pub mod catalog;
pub mod codec;
pub mod format;
pub mod inline;
pub mod iter;
pub mod reader;
pub mod sink;
pub mod types;
