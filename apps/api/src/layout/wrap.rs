//! Greedy word wrap.
//!
//! Pure function of (text, metrics, size, max width): no page state involved.
//! Words are maximal runs of non-whitespace; lines are joined with single spaces.
//! A word wider than the limit gets a line of its own and is never split.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width` points at `font_size`.
///
/// Returns an empty vector for empty or whitespace-only input.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let space_w = metrics.space_width * font_size;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.text_width(word, font_size);

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
