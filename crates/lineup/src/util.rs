//! Utility functions for text measurement, truncation, and padding.
//!
//! All functions are Unicode-aware: CJK characters count as two display
//! columns, combining marks as zero.

use console::{measure_text_width, pad_str, Alignment};

/// Returns the display width of a string in terminal columns.
///
/// # Example
///
/// ```rust
/// use lineup::display_width;
///
/// assert_eq!(display_width("hello"), 5);
/// assert_eq!(display_width("日本"), 4);  // CJK characters are 2 columns each
/// ```
pub fn display_width(s: &str) -> usize {
    measure_text_width(s)
}

/// Pads a string on the left (right-aligns) to reach the target width.
///
/// Strings already at or beyond the target width are returned unchanged;
/// this function never truncates.
///
/// # Example
///
/// ```rust
/// use lineup::pad_left;
///
/// assert_eq!(pad_left("42", 5), "   42");
/// assert_eq!(pad_left("hello", 3), "hello");
/// ```
pub fn pad_left(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Right, None).into_owned()
}

/// Pads a string on the right (left-aligns) to reach the target width.
///
/// # Example
///
/// ```rust
/// use lineup::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// ```
pub fn pad_right(s: &str, width: usize) -> String {
    pad_str(s, width, Alignment::Left, None).into_owned()
}

/// Truncates a string from the end to fit within a maximum display width.
///
/// If the string already fits, it is returned unchanged. Otherwise,
/// characters are removed from the end and the marker is appended. When
/// `max_width` is smaller than the marker itself, the marker is cut down
/// too, so the result never exceeds `max_width`.
///
/// # Example
///
/// ```rust
/// use lineup::truncate_end;
///
/// assert_eq!(truncate_end("A very long value", 14, "..."), "A very long...");
/// assert_eq!(truncate_end("short", 10, "..."), "short");
/// ```
pub fn truncate_end(s: &str, max_width: usize, marker: &str) -> String {
    let width = measure_text_width(s);
    if width <= max_width {
        return s.to_string();
    }

    let marker_width = measure_text_width(marker);
    if max_width < marker_width {
        // Not enough room even for the marker - truncate the marker itself
        return truncate_to_display_width(marker, max_width);
    }
    if max_width == marker_width {
        return marker.to_string();
    }

    let target_width = max_width - marker_width;
    let mut result = truncate_to_display_width(s, target_width);
    result.push_str(marker);
    result
}

/// Truncate a string to fit a display width, keeping characters from the start.
fn truncate_to_display_width(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + char_width > max_width {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
