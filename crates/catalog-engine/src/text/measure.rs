//! Width-bounded truncation and greedy word-wrap over the static metric
//! tables.
//!
//! Truncation is idempotent: re-truncating an already-truncated string to the
//! same width returns it unchanged. Every line produced by `wrap_to_width`
//! measures at or under the requested width, including the pathological
//! single-word-wider-than-a-line case.

use crate::text::font_metrics::{measure_width, metrics_for, space_width, FontSpec};

pub const ELLIPSIS: &str = "...";

/// Shortens `text` so it fits `max_width`, appending an ellipsis when
/// anything was cut. A `max_width` too small for even the ellipsis yields the
/// empty string.
pub fn truncate_to_width(text: &str, spec: &FontSpec, max_width: f32) -> String {
    if measure_width(text, spec) <= max_width {
        return text.to_string();
    }

    let ellipsis_w = measure_width(ELLIPSIS, spec);
    if ellipsis_w > max_width {
        return String::new();
    }

    let table = metrics_for(spec.family);
    let budget = max_width - ellipsis_w;
    let mut kept = String::new();
    let mut used = 0.0_f32;
    for c in text.chars() {
        let cw = table.char_em(c) * spec.size_pt;
        if used + cw > budget {
            break;
        }
        kept.push(c);
        used += cw;
    }

    let kept = kept.trim_end();
    format!("{kept}{ELLIPSIS}")
}

/// Greedy word-wrap of `text` into at most `max_lines` lines of `max_width`.
///
/// Words never straddle lines. When content still exceeds `max_lines` after
/// wrapping, the last retained line is truncated with an ellipsis — words are
/// never dropped silently any other way. A single word wider than a full line
/// is truncated in place.
pub fn wrap_to_width(
    text: &str,
    spec: &FontSpec,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    if max_lines == 0 {
        return vec![];
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return vec![];
    }

    let space_w = space_width(spec);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_w = 0.0_f32;

    for word in words {
        let word_w = measure_width(word, spec);

        if !current.is_empty() && current_w + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current_w = 0.0;
        }

        if current.is_empty() {
            if word_w > max_width {
                lines.push(truncate_to_width(word, spec, max_width));
            } else {
                current.push_str(word);
                current_w = word_w;
            }
        } else {
            current.push(' ');
            current.push_str(word);
            current_w += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        let overflow = lines.split_off(max_lines);
        let last = lines.pop().unwrap_or_default();
        let combined = format!("{} {}", last, overflow.join(" "));
        lines.push(truncate_to_width(&combined, spec, max_width));
    }

    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
