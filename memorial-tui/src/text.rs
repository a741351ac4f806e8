//! Terminal text measurement.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Cuts `s` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push('…');
    result
}

/// Truncates or right-pads `s` to exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut result = truncate_to_width(s, width);
    let current = display_width(&result);
    if current < width {
        result.push_str(&" ".repeat(width - current));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_to_width("Hrvatska", 20), "Hrvatska");
        assert_eq!(truncate_to_width("Hrvatska", 5), "Hrva…");
        assert_eq!(truncate_to_width("Hrvatska", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each ideograph is two columns wide.
        assert_eq!(truncate_to_width("追悼追悼", 5), "追悼…");
    }

    #[test]
    fn test_fit_pads_and_cuts() {
        assert_eq!(fit_to_width("Ana", 6), "Ana   ");
        assert_eq!(fit_to_width("Marija Kovač", 6), "Marij…");
        assert_eq!(display_width(&fit_to_width("Kovač", 8)), 8);
    }
}
