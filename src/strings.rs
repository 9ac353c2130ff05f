// String manipulation utilities

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Make a tool label safe to print on a terminal.
///
/// Embedded names are raw bytes from the card, so escape sequences are
/// stripped and remaining control characters become spaces.
///
/// Examples:
/// - "\x1b[31mRed\x1b[0m" -> "Red"
/// - "Tab\tName" -> "Tab Name"
pub fn sanitize_label(label: &str) -> String {
    // ESC must survive until the escape sequences are gone
    let spaced: String = label
        .chars()
        .map(|c| if c.is_control() && c != '\x1b' { ' ' } else { c })
        .collect();
    strip_ansi_escapes::strip_str(spaced)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

/// Cut `text` to at most `width` terminal columns
pub fn fit_width(text: &str, width: usize) -> &str {
    if text.width() <= width {
        return text;
    }

    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &text[..idx];
        }
        used += w;
    }
    text
}
