//! Container framing layer for module files.
//!
//! This module turns a raw buffer into key/value or positional units
//! before any field is interpreted.
//!
//! # Module Organization
//!
//! - [`segment`]: Splits the buffer on the null delimiter
//! - [`pairing`]: Strict and heuristic key/value pairing
//! - [`positional`]: Fixed-stride lookup for delimiter-free tables
//!
//! # Architecture
//!
//! ```text
//! Buffer:
//! ┌──────┬──┬────────┬──┬──────┬──┬─────
//! │ key  │\0│ value  │\0│ key  │\0│ ...   ← segment::segments()
//! └──────┴──┴────────┴──┴──────┴──┴─────
//!     │         │
//!     └────┬────┘
//!          ▼
//!   pairing::{StrictPairs, HeuristicPairs}
//!   positional::PositionalRecords
//! ```

pub mod pairing;
pub mod positional;
pub mod segment;
