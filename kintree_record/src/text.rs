// Copyright 2025 the Kintree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Two-letter initials glyph for `name`.
///
/// Takes the first letter of each of the first two whitespace-separated
/// tokens and uppercases them, keeping at most two characters even when a
/// letter uppercases to several (`ß` becomes `SS`). A single-token name
/// yields one letter and an empty name yields an empty string.
///
/// ```
/// use kintree_record::initials;
///
/// assert_eq!(initials("Chiu Sau Ying"), "CS");
/// assert_eq!(initials("anthony"), "A");
/// assert_eq!(initials(""), "");
/// ```
#[must_use]
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::initials;

    #[test]
    fn collapses_repeated_whitespace() {
        assert_eq!(initials("  wai   lin "), "WL");
        assert_eq!(initials("\tKing\nWa"), "KW");
    }

    #[test]
    fn uppercases_non_ascii_letters() {
        assert_eq!(initials("élodie martin"), "ÉM");
    }

    #[test]
    fn multi_char_uppercase_stays_two_letters() {
        assert_eq!(initials("ßen Yu"), "SS");
        assert_eq!(initials("ßen"), "SS");
        assert_eq!(initials("Yu ßen"), "YS");
    }
}
