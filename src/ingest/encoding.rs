//! Text decoding for the legacy Windows-1252 data files.
//!
//! Two operations live here:
//!
//! * [`decode_legacy_line`] turns the raw bytes of a line into text.
//! * [`recode_field`] repairs a field that was UTF-8 misread as Windows-1252
//!   ("LeciÃ±ena") and leaves correctly decoded text alone ("Leciñena").
//!
//! Both are idempotent on text that is already correct, so running them on a file
//! that was re-saved as UTF-8 does not corrupt accented characters.

use encoding_rs::WINDOWS_1252;
use std::borrow::Cow;

/// Decodes one line of a data file.
///
/// Bytes that already form valid UTF-8 are returned as-is. Anything else is decoded
/// as Windows-1252, which maps every byte to a character and therefore never fails.
pub fn decode_legacy_line(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => {
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    }
}

/// Repairs mojibake in a single text field.
///
/// If the characters of `text`, written back as Windows-1252 bytes, form different
/// valid UTF-8, the field was decoded twice and the UTF-8 reading is the intended
/// text. The repair is repeated until the text no longer changes, so
/// `recode_field(&recode_field(x)) == recode_field(x)` holds.
pub fn recode_field(text: &str) -> Cow<'_, str> {
    let mut current = Cow::Borrowed(text);
    while let Some(repaired) = repair_once(&current) {
        current = Cow::Owned(repaired);
    }
    current
}

fn repair_once(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }
    let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
    if unmappable {
        // Characters outside Windows-1252 cannot come from a misread legacy byte.
        return None;
    }
    match std::str::from_utf8(&bytes) {
        Ok(repaired) if repaired != text => Some(repaired.to_string()),
        _ => None,
    }
}
