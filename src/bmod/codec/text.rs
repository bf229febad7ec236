//! Legacy code page text decoding.
//!
//! Module files store text in Windows-1252. Five byte values have no
//! assignment in that code page; they decode to [`PLACEHOLDER`] instead of
//! failing the segment.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;

/// Substituted for bytes with no mapping in the code page.
pub const PLACEHOLDER: char = '\u{FFFD}';

/// Written back in place of [`PLACEHOLDER`] by [`encode_text`].
pub const PLACEHOLDER_BYTE: u8 = b'?';

/// Bytes left unassigned by the legacy code page.
const UNDEFINED_BYTES: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Decodes a segment. Never fails; trimming is left to the caller.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let decoded = WINDOWS_1252.decode_without_bom_handling(bytes).0;
    if !bytes.iter().any(|b| UNDEFINED_BYTES.contains(b)) {
        return decoded;
    }
    // encoding_rs passes these through as C1 controls; the legacy code page does not.
    Cow::Owned(
        decoded
            .chars()
            .map(|c| {
                if (c as u32) < 0x100 && UNDEFINED_BYTES.contains(&(c as u32 as u8)) {
                    PLACEHOLDER
                } else {
                    c
                }
            })
            .collect(),
    )
}

/// Decodes and trims a segment, returning `None` when nothing is left.
pub fn decode_field(bytes: &[u8]) -> Option<String> {
    let text = decode_text(bytes);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Re-encodes text in the legacy code page.
///
/// Placeholders become [`PLACEHOLDER_BYTE`]; characters outside the code
/// page are written as HTML numeric character references by `encoding_rs`.
pub fn encode_text(text: &str) -> Vec<u8> {
    let text: Cow<'_, str> = if text.contains(PLACEHOLDER) {
        Cow::Owned(text.replace(PLACEHOLDER, &(PLACEHOLDER_BYTE as char).to_string()))
    } else {
        Cow::Borrowed(text)
    };
    WINDOWS_1252.encode(&text).0.into_owned()
}
