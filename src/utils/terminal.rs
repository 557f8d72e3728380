//! Sanitization of backend and history text before it reaches the terminal
//!
//! Product names, descriptions and stored history queries are not trusted: an escape
//! sequence in any of them could move the cursor or repaint the screen under the TUI.
//! Everything drawn from those sources goes through [`strip_ansi_codes`].

/// Strips ANSI CSI sequences and control characters
///
/// Tab, newline and carriage return are kept.
///
/// ```
/// use petshop_storefront::utils::terminal::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[1mBone\x1b[0m"), "Bone");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI ends at the first letter
            for next_ch in chars.by_ref() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() && !matches!(ch, '\t' | '\n' | '\r') {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Single-line form for list rows: sanitized, with line breaks folded into spaces
pub fn single_line(text: &str) -> String {
    strip_ansi_codes(text).split_whitespace().collect::<Vec<_>>().join(" ")
}
