//! Script-range language detection.

use physio_core::constants::MIXED_SCRIPT_MIN_CHARS;
use physio_core::Language;

/// Whether a codepoint falls in one of the Arabic script blocks.
pub fn is_arabic_char(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}

/// Detect the dominant script of a text.
///
/// Any Arabic-range codepoint makes the text Arabic; Latin letters make it
/// English; both scripts above a minimal count make it mixed. Empty or
/// script-free text defaults to English.
pub fn detect_language(text: &str) -> Language {
    let mut arabic = 0usize;
    let mut latin = 0usize;
    for c in text.chars() {
        if is_arabic_char(c) {
            arabic += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        }
    }

    if arabic >= MIXED_SCRIPT_MIN_CHARS && latin >= MIXED_SCRIPT_MIN_CHARS {
        Language::Mixed
    } else if arabic > 0 {
        Language::Arabic
    } else {
        Language::English
    }
}
