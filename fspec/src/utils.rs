// src/utils.rs

/// Whether a file name counts as hidden on Unix: it starts with a dot and
/// is not `.` or `..`.
#[inline]
#[must_use]
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.') && name != "." && name != ".."
}

/// Formats a count with comma thousands separators, as the listing totals
/// are printed.
///
/// ```
/// use fspec::utils::format_count;
///
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
