//! Hexadecimal ASCII identifier resolution.
//!
//! Verse ids are stored as upper-case hex text (`7225`, `36C0`), and ranges
//! as two bounds joined by a hyphen (`3BEA-3BEB`).

use std::ops::RangeInclusive;

use crate::bmod::types::error::UnresolvableKey;
use crate::bmod::types::models::Identifier;

/// A resolved key: one id, or an inclusive run of ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexKey {
    Single(Identifier),
    Range { start: Identifier, end: Identifier },
}

impl HexKey {
    /// Parses `"36C0"` or `"3825-3827"`.
    pub fn parse(text: &str) -> Result<Self, UnresolvableKey> {
        if text.is_empty() {
            return Err(UnresolvableKey::Empty);
        }
        if let Some(found) = text.chars().find(|c| !c.is_ascii_hexdigit() && *c != '-') {
            return Err(UnresolvableKey::InvalidCharacter {
                key: text.to_string(),
                found,
            });
        }

        match text.split_once('-') {
            None => resolve(text).map(HexKey::Single),
            Some((start, end)) => {
                if end.contains('-') {
                    return Err(UnresolvableKey::MalformedRange(text.to_string()));
                }
                let start = resolve(start).map_err(|_| UnresolvableKey::MalformedRange(text.to_string()))?;
                let end = resolve(end).map_err(|_| UnresolvableKey::MalformedRange(text.to_string()))?;
                if start > end {
                    return Err(UnresolvableKey::InvertedRange { start, end });
                }
                Ok(HexKey::Range { start, end })
            }
        }
    }

    /// Every id covered by the key, in ascending order.
    pub fn ids(&self) -> RangeInclusive<Identifier> {
        match *self {
            HexKey::Single(id) => id..=id,
            HexKey::Range { start, end } => start..=end,
        }
    }
}

/// Parses a single hex identifier with no range syntax.
pub fn resolve(text: &str) -> Result<Identifier, UnresolvableKey> {
    if text.is_empty() {
        return Err(UnresolvableKey::Empty);
    }
    // from_str_radix would accept a leading '+'
    if let Some(found) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(UnresolvableKey::InvalidCharacter {
            key: text.to_string(),
            found,
        });
    }
    Identifier::from_str_radix(text, 16).map_err(|_| UnresolvableKey::Overflow(text.to_string()))
}

/// Resolves a possibly-ranged key into its enumerated ids.
pub fn resolve_ids(text: &str) -> Result<Vec<Identifier>, UnresolvableKey> {
    HexKey::parse(text).map(|key| key.ids().collect())
}
