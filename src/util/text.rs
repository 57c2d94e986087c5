use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Display width of a string in terminal columns (CJK and emoji count as 2).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncates `s` to at most `max_width` columns, appending "..." when cut.
///
/// Widths of 3 or less leave no room for an ellipsis, so as many whole
/// characters as fit are returned instead. Returns `Cow::Borrowed` when the
/// string already fits.
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let budget = if max_width <= ELLIPSIS_WIDTH {
        max_width
    } else {
        max_width - ELLIPSIS_WIDTH
    };

    let mut used = 0;
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        end = idx + c.len_utf8();
    }

    if max_width <= ELLIPSIS_WIDTH {
        Cow::Owned(s[..end].to_string())
    } else {
        Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
    }
}

/// Uppercased first character of `s`, or `None` for an empty string.
///
/// Uses the full Unicode mapping, so a single character may expand
/// (`'ß'` becomes `"SS"`).
///
/// # Examples
///
/// ```
/// use studynav::util::first_letter_upper;
///
/// assert_eq!(first_letter_upper("algebra").as_deref(), Some("A"));
/// assert_eq!(first_letter_upper("ßtraße").as_deref(), Some("SS"));
/// assert_eq!(first_letter_upper(""), None);
/// ```
pub fn first_letter_upper(s: &str) -> Option<String> {
    s.chars().next().map(|c| c.to_uppercase().collect())
}

fn is_stripped_control(c: char) -> bool {
    c == '\u{7f}' || (c < '\u{20}' && c != '\t' && c != '\n' && c != '\r')
}

/// Strips terminal control characters and ANSI escape sequences.
///
/// Removes C0 controls (except tab, newline and carriage return), DEL,
/// CSI sequences (`ESC [` ... final byte `0x40..=0x7e`), OSC sequences
/// (`ESC ]` ... BEL or `ESC \`) and bare ESC bytes. Clean input is returned
/// borrowed.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(|c| c == '\u{1b}' || is_stripped_control(c)) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for c in chars.by_ref() {
                        if ('\u{40}'..='\u{7e}').contains(&c) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '\u{07}' {
                            break;
                        }
                        if c == '\u{1b}' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
        } else if !is_stripped_control(c) {
            out.push(c);
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits_is_borrowed() {
        let result = truncate_to_width("Physics", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "Physics");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_to_width("Organic Chemistry", 10), "Organic...");
    }

    #[test]
    fn test_truncate_narrow_widths_skip_ellipsis() {
        assert_eq!(truncate_to_width("Biology", 0), "");
        assert_eq!(truncate_to_width("Biology", 2), "Bi");
        assert_eq!(truncate_to_width("Biology", 3), "Bio");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Each CJK char is two columns wide
        assert_eq!(truncate_to_width("数学物理化学", 7), "数学...");
        assert_eq!(truncate_to_width("数学", 1), "");
    }

    #[test]
    fn test_first_letter_upper() {
        assert_eq!(first_letter_upper("algebra").as_deref(), Some("A"));
        assert_eq!(first_letter_upper("Ökonomie").as_deref(), Some("Ö"));
        assert_eq!(first_letter_upper("ßtraße").as_deref(), Some("SS"));
        assert_eq!(first_letter_upper(""), None);
    }

    #[test]
    fn test_strip_clean_text_borrowed() {
        let result = strip_control_chars("General Studies");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_strip_controls_and_escapes() {
        assert_eq!(strip_control_chars("Ma\x00th\x07s"), "Maths");
        assert_eq!(strip_control_chars("\x1b[31mHistory\x1b[0m"), "History");
        assert_eq!(strip_control_chars("\x1b]0;title\x07Geo"), "Geo");
        assert_eq!(strip_control_chars("\x1b]0;title\x1b\\Geo"), "Geo");
        assert_eq!(strip_control_chars("bare\x1bescape"), "bareescape");
    }

    #[test]
    fn test_strip_keeps_whitespace_controls() {
        let input = "line\tone\r\nline two";
        assert_eq!(strip_control_chars(input), input);
    }
}
