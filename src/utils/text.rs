//! Sanitizing backend-returned text for terminal display.
//!
//! Result fields and citation titles come from an AI reply summarizing web
//! content, so they are untrusted: embedded ANSI escape sequences could move
//! the cursor, restyle the screen or worse. Everything rendered into the
//! terminal goes through [`sanitize_display_text`] first.

/// Strips ANSI CSI escape sequences and control characters from a string.
///
/// Newlines and tabs are collapsed to single spaces since sanitized text is
/// rendered into single-line table cells.
pub fn sanitize_display_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            // CSI sequence: ESC [ ... terminated by a letter
            if chars.peek() == Some(&'[') {
                chars.next();
                while let Some(&next) = chars.peek() {
                    chars.next();
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }

        if ch == '\n' || ch == '\t' || ch == '\r' {
            if !result.ends_with(' ') {
                result.push(' ');
            }
            continue;
        }

        if ch.is_control() {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Truncate text to at most `max_chars` characters, appending an ellipsis
/// when anything was cut
pub fn truncate_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
