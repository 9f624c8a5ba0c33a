//! String utility functions for common string operations.

use std::cmp::Ordering;

/// Punctuation and symbols in root collation order. Characters not listed
/// sort after these, by code point.
const PUNCTUATION_ORDER: &str = "_-,;:!?.'\"()[]{}@*/\\&#%`^+<=>|~$";

/// Primary collation class: whitespace, then punctuation and symbols, then
/// digits, then letters.
fn char_class(c: char) -> u8 {
    if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else if c.is_whitespace() {
        0
    } else {
        1
    }
}

fn punctuation_rank(c: char) -> usize {
    PUNCTUATION_ORDER
        .chars()
        .position(|p| p == c)
        .unwrap_or(PUNCTUATION_ORDER.len())
}

fn primary_key(c: char) -> (u8, usize, char) {
    let class = char_class(c);
    let rank = if class == 1 { punctuation_rank(c) } else { 0 };
    (class, rank, c.to_lowercase().next().unwrap_or(c))
}

/// Compare two strings the way a locale-aware collator orders identifiers.
///
/// Letters compare case-insensitively first, with lowercase winning ties, and
/// punctuation sorts before digits and letters in root collation order
/// (`_` < `-` < `.` < `@` < `/`). The final fallback is plain byte order, so
/// the result is a total order.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use extmods::string_utils::locale_cmp;
///
/// assert_eq!(locale_cmp("@types/node", "axios"), Ordering::Less);
/// assert_eq!(locale_cmp("Zod", "axios"), Ordering::Greater);
/// assert_eq!(locale_cmp("react", "React"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(primary_key)
        .cmp(b.chars().map(primary_key))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| locale_cmp(a, b));
        names
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(
            sorted(vec!["zod", "Express", "axios"]),
            vec!["axios", "Express", "zod"]
        );
    }

    #[test]
    fn test_locale_cmp_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("react", "React"), Ordering::Less);
        assert_eq!(locale_cmp("React", "react"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_punctuation_first() {
        assert_eq!(
            sorted(vec!["lodash", "@nestjs/core", "2fa", "fs-extra", "fsevents"]),
            vec!["@nestjs/core", "2fa", "fs-extra", "fsevents", "lodash"]
        );
    }

    #[test]
    fn test_locale_cmp_punctuation_order() {
        assert_eq!(
            sorted(vec!["my.lib", "my-lib", "my_lib"]),
            vec!["my_lib", "my-lib", "my.lib"]
        );
        assert_eq!(locale_cmp("a@b", "a/b"), Ordering::Less);
        assert_eq!(locale_cmp("a.b", "a@b"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_unlisted_symbols_sort_after_listed() {
        assert_eq!(locale_cmp("a$b", "a\u{00a7}b"), Ordering::Less);
        assert_eq!(locale_cmp("a\u{00a7}b", "a0"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_prefix_sorts_first() {
        assert_eq!(locale_cmp("uuid", "uuidv4"), Ordering::Less);
    }

    #[test]
    fn test_locale_cmp_equal() {
        assert_eq!(locale_cmp("express", "express"), Ordering::Equal);
    }
}
