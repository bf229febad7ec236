//! Delimiter framing over a raw module buffer.

/// Record separator used by every module container.
pub const NUL: u8 = 0x00;

/// Iterator over the byte slices between delimiters.
///
/// The delimiter itself is never part of a segment. A terminal delimiter
/// does not produce a trailing empty segment; interior empty segments are
/// kept because pairers and positional tables count them.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: Option<&'a [u8]>,
    delimiter: u8,
}

impl<'a> Segments<'a> {
    pub fn new(buffer: &'a [u8], delimiter: u8) -> Self {
        Self {
            rest: (!buffer.is_empty()).then_some(buffer),
            delimiter,
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.iter().position(|&b| b == self.delimiter) {
            Some(end) => {
                let tail = &rest[end + 1..];
                self.rest = (!tail.is_empty()).then_some(tail);
                Some(&rest[..end])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Splits a buffer on the null byte.
pub fn segments(buffer: &[u8]) -> Segments<'_> {
    Segments::new(buffer, NUL)
}
