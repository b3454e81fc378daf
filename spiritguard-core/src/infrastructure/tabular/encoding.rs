// spiritguard-core/src/infrastructure/tabular/encoding.rs
//
// Government exports arrive in whatever the uploading office's spreadsheet
// saved them as. Decoding is tried strictest first.

use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::fmt;

/// Bytes that CP-1252 leaves undefined. A strict decoder rejects them.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Cp1252,
    Latin1,
}

impl TextEncoding {
    /// Fallback order used by [`decode_text`].
    pub const FALLBACK_ORDER: [TextEncoding; 3] = [Self::Utf8, Self::Cp1252, Self::Latin1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Cp1252 => "cp1252",
            Self::Latin1 => "iso-8859-1",
        }
    }

    /// Strict decode: `None` if the bytes are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::Cp1252 => {
                if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
                    return None;
                }
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
            // Every byte maps to the code point of the same value
            Self::Latin1 => Some(Cow::Owned(latin1(bytes))),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decodes with the first encoding of [`TextEncoding::FALLBACK_ORDER`] that accepts the bytes.
/// Latin-1 accepts anything, so this never fails.
pub fn decode_text(bytes: &[u8]) -> (String, TextEncoding) {
    TextEncoding::FALLBACK_ORDER
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (text.into_owned(), *enc)))
        .unwrap_or_else(|| (latin1(bytes), TextEncoding::Latin1))
}

fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_preferred() {
        let (text, enc) = decode_text("Belagavi,₹".as_bytes());
        assert_eq!(enc, TextEncoding::Utf8);
        assert_eq!(text, "Belagavi,₹");
    }

    #[test]
    fn test_cp1252_fallback() {
        // 0x96 is an en dash in CP-1252 and invalid as a lone UTF-8 byte
        let (text, enc) = decode_text(b"2015\x9616");
        assert_eq!(enc, TextEncoding::Cp1252);
        assert_eq!(text, "2015\u{2013}16");
    }

    #[test]
    fn test_latin1_takes_undefined_cp1252_bytes() {
        let (text, enc) = decode_text(b"Mysore\x81");
        assert_eq!(enc, TextEncoding::Latin1);
        assert_eq!(text, "Mysore\u{81}");
    }
}
