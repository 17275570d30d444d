use log::warn;
use std::fmt;

/// Text encoding an input file was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
            TextEncoding::Latin1 => write!(f, "latin-1"),
        }
    }
}

/// Decodes CSV bytes as UTF-8, falling back to Latin-1 when the bytes are not
/// valid UTF-8. Latin-1 maps every byte to a code point, so the fallback
/// cannot fail. A leading UTF-8 byte order mark is dropped.
pub fn decode_text(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(mut text) => {
            if text.starts_with('\u{feff}') {
                text.drain(..'\u{feff}'.len_utf8());
            }
            (text, TextEncoding::Utf8)
        }
        Err(e) => {
            warn!(
                "Input is not valid UTF-8 ({}), decoding as latin-1",
                e.utf8_error()
            );
            let text = e.into_bytes().into_iter().map(char::from).collect();
            (text, TextEncoding::Latin1)
        }
    }
}
