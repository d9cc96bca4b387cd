//! Greedy word wrapping against measured glyph widths.
//!
//! Words are separated by single spaces. Each word is measured together with
//! one trailing space, and words are packed onto a line while the running
//! width stays within the print width. A word that is wider than the print
//! width on its own still gets a line of its own, unsplit.
//!
//! ```text
//! print_width = 200
//!
//! "Hello " 60  ──┐
//! "world " 65  ──┴─► "Hello world"       (125 <= 200)
//! "again " 90  ────► "again"             (215 >  200, new line)
//! ```

use super::GlyphRenderer;

/// Split `text` into lines no wider than `print_width`.
///
/// Empty tokens (from leading, trailing, or repeated spaces) are skipped, so
/// they never produce blank lines and never widen a line. Empty or all-space
/// input yields no lines.
pub fn wrap_lines<F: GlyphRenderer + ?Sized>(text: &str, print_width: u32, font: &F) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_width: u32 = 0;

    for word in text.split(' ').filter(|w| !w.is_empty()) {
        let word_width = font.measure_width(&format!("{} ", word));

        if current_width.saturating_add(word_width) <= print_width {
            current.push(word);
            current_width += word_width;
        } else {
            // An oversized first word must not leave a blank line behind it
            if !current.is_empty() {
                lines.push(current.join(" "));
            }
            current = vec![word];
            current_width = word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}
