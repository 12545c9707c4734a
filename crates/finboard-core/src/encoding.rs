//! Repair of category labels that were UTF-8 decoded as Latin-1
//!
//! Upstream ledgers sometimes hand back "AlimentaciÃ³n" for "Alimentación":
//! the UTF-8 bytes were read one byte per character. When every character of
//! a label fits in a byte and those bytes form valid UTF-8, the label is
//! re-decoded; anything else is returned untouched.

use std::borrow::Cow;

/// Undo a UTF-8 → Latin-1 mis-decoding, if that is what happened
pub fn repair_mojibake(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match u8::try_from(u32::from(ch)) {
            Ok(b) => bytes.push(b),
            // Already contains characters outside Latin-1: genuine UTF-8
            Err(_) => return Cow::Borrowed(text),
        }
    }

    match String::from_utf8(bytes) {
        Ok(repaired) => {
            tracing::debug!(label = text, repaired = %repaired, "Repaired mis-decoded label");
            Cow::Owned(repaired)
        }
        Err(_) => Cow::Borrowed(text),
    }
}
