//! Spreadsheet column letters ("A", "AM", ...) to zero-based indices and back

use super::RosterError;

/// Convert a column label to its zero-based index ("A" -> 0, "AA" -> 26).
///
/// Letters are case-insensitive. Anything that is not a non-empty run of
/// ASCII letters is rejected.
pub fn column_index(label: &str) -> Result<usize, RosterError> {
    let invalid = || RosterError::InvalidColumnLabel {
        label: label.to_string(),
    };

    if label.is_empty() {
        return Err(invalid());
    }

    let mut index: usize = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(invalid());
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(invalid)?;
    }

    Ok(index - 1)
}

/// Convert a zero-based index back to its column label (0 -> "A").
pub fn column_label(index: usize) -> String {
    let mut label = String::new();
    let mut n = index + 1;

    while n > 0 {
        let remainder = (n - 1) % 26;
        label.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    label
}
