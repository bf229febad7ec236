//! Codec layer for field-level conversions.
//!
//! # Submodules
//!
//! - [`text`][]: Legacy code page decoding with placeholder substitution
//! - [`hex`][]: Hexadecimal identifier and range resolution

pub mod hex;
pub mod text;
