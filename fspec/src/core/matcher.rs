// src/core/matcher.rs
use crate::core::codepage::{char_lower, char_upper, to_code_page};
use std::cmp::Ordering;

/// The two wildcard characters.
pub const WILDCARDS: [char; 2] = ['*', '?'];

/// Whether `text` contains `*` or `?` anywhere.
#[inline]
#[must_use]
pub fn has_wildcard(text: &str) -> bool {
    text.contains(WILDCARDS)
}

/// Whether `pattern` is made of nothing but `*` and `?`.
///
/// The empty pattern counts as all-wild.
#[must_use]
pub fn is_all_wild(pattern: &str) -> bool {
    pattern.chars().all(|c| WILDCARDS.contains(&c))
}

/// Single-character comparison used by [`string_match`].
///
/// `?` in the pattern accepts any character. Without case sensitivity two
/// characters are equal when their table upper-cases agree or their table
/// lower-cases agree; both directions are checked because the tables are
/// not inverses of each other.
#[must_use]
pub fn char_match(input: char, pattern: char, case_sensitive: bool) -> bool {
    if pattern == '?' || input == pattern {
        return true;
    }
    if case_sensitive {
        return false;
    }
    match (to_code_page(input), to_code_page(pattern)) {
        (Some(i), Some(p)) => char_upper(i) == char_upper(p) || char_lower(i) == char_lower(p),
        _ => false,
    }
}

/// Matches `input` against a wildcard `pattern`.
///
/// * `?` matches exactly one character.
/// * `*` matches any run of characters, including none.
/// * An empty pattern matches only empty input.
/// * A pattern made only of `*` and `?` matches any input at all, even
///   input shorter than the number of `?`s, and even empty input.
///
/// Matching is leftmost-first backtracking; the first position that lets
/// the rest of the pattern match wins.
///
/// ```
/// use fspec::core::matcher::string_match;
///
/// assert!(string_match("REPORT.TXT", "*.txt", false));
/// assert!(!string_match("report.bin", "*.txt", false));
/// assert!(string_match("ab", "a?", true));
/// ```
#[must_use]
pub fn string_match(input: &str, pattern: &str, case_sensitive: bool) -> bool {
    let input: Vec<char> = input.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_chars(&input, &pattern, case_sensitive)
}

fn match_chars(input: &[char], pattern: &[char], case_sensitive: bool) -> bool {
    if pattern.is_empty() {
        return input.is_empty();
    }

    let wild = pattern.iter().all(|c| WILDCARDS.contains(c));
    if input.is_empty() || wild {
        return wild;
    }

    let mut pos = 0;
    let mut p = 0;
    while let Some(&pc) = pattern.get(p) {
        if pc == '*' {
            while pattern.get(p) == Some(&'*') {
                p += 1;
            }
            let Some(&next) = pattern.get(p) else {
                // trailing star takes the rest
                return true;
            };
            return (pos..input.len()).any(|i| {
                char_match(input[i], next, case_sensitive)
                    && match_chars(&input[i + 1..], &pattern[p + 1..], case_sensitive)
            });
        }

        match input.get(pos) {
            Some(&c) if char_match(c, pc, case_sensitive) => pos += 1,
            _ => return false,
        }
        p += 1;
    }

    pos == input.len()
}

/// Orders two names, folding case through the code-page tables unless
/// `case_sensitive` is set.
#[must_use]
pub fn string_compare(a: &str, b: &str, case_sensitive: bool) -> Ordering {
    if case_sensitive {
        return a.cmp(b);
    }
    let mut left = a.chars();
    let mut right = b.chars();
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                if l != r && !(l != '?' && r != '?' && char_match(l, r, false)) {
                    return l.cmp(&r);
                }
            }
        }
    }
}
