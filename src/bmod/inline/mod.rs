//! Interpreters for markers embedded in decoded text.
//!
//! These run after the text codec, on `&str` values rather than raw bytes.
//!
//! - [`interlinear`]: Aligns words with Strong's markers
//! - [`xref`]: Expands cross-reference tokens into edges

pub mod interlinear;
pub mod xref;
