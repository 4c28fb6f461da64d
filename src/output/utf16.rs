use crate::output::ConvertError;
use std::ops::Range;

/// A message's text, alongside its UTF-16 encoding.
///
/// Entity offsets are in UTF-16 code units, so all slicing goes through the encoded form.
pub(crate) struct Utf16Text<'a> {
    text: &'a str,
    units: Vec<u16>,
}

impl<'a> Utf16Text<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            text,
            units: text.encode_utf16().collect(),
        }
    }

    /// The length in code units.
    pub(crate) fn len(&self) -> usize {
        self.units.len()
    }

    /// Decodes the code units in `range`.
    pub(crate) fn decode(&self, range: Range<usize>) -> Result<String, ConvertError> {
        let Some(units) = self.units.get(range.clone()) else {
            return Err(ConvertError::EntityOutOfBounds {
                start: range.start,
                end: range.end,
                text_len: self.len(),
            });
        };
        String::from_utf16(units).map_err(|_| ConvertError::SplitSurrogate {
            start: range.start,
            end: range.end,
        })
    }

    /// The code-unit offset of each `'\n'` in the text, in ascending order.
    pub(crate) fn newline_offsets(&self) -> impl Iterator<Item = usize> + 'a {
        let text = self.text;
        let mut counted_through = 0;
        let mut units_so_far = 0;
        memchr::memchr_iter(b'\n', text.as_bytes()).map(move |byte_idx| {
            // '\n' is a single byte that never appears inside a multibyte sequence, so byte_idx is a char boundary.
            units_so_far += text[counted_through..byte_idx].encode_utf16().count();
            counted_through = byte_idx;
            units_so_far
        })
    }
}
