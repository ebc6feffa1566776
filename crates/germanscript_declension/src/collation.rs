//! Umlaut-folding collation for dictionary keys.
//!
//! German readers expect "Bäume" to sort before "Baumhaus", while plain
//! code point order puts every umlaut after all ASCII letters. Folding
//! ä/ö/ü to their base vowels fixes the order; exact spelling only breaks
//! ties, so "Baum" and "Bäum" remain distinct keys.

use std::cmp::Ordering;

/// Maps an umlaut to its base vowel, leaving every other character alone.
#[must_use]
pub const fn fold(c: char) -> char {
    match c {
        'ä' => 'a',
        'ö' => 'o',
        'ü' => 'u',
        'Ä' => 'A',
        'Ö' => 'O',
        'Ü' => 'U',
        other => other,
    }
}

/// Total order used to keep the dictionary sorted.
#[must_use]
pub fn compare(left: &str, right: &str) -> Ordering {
    left.chars()
        .map(fold)
        .cmp(right.chars().map(fold))
        .then_with(|| left.cmp(right))
}

/// Compares only the first `min(len(word), len(key))` characters, folded.
///
/// Every inflected form starts with (roughly) its nominative singular, so
/// this finds the entry a surface form belongs to.
#[must_use]
pub fn compare_prefix(word: &str, key: &str) -> Ordering {
    let length = word.chars().count().min(key.chars().count());
    word.chars()
        .take(length)
        .map(fold)
        .cmp(key.chars().take(length).map(fold))
}

/// Compares the folded strings only, ignoring exact spelling.
#[must_use]
pub fn compare_folded(left: &str, right: &str) -> Ordering {
    left.chars().map(fold).cmp(right.chars().map(fold))
}

/// True if `word` begins with `prefix` after folding both.
#[must_use]
pub fn starts_with_folded(word: &str, prefix: &str) -> bool {
    let mut letters = word.chars().map(fold);
    prefix.chars().map(fold).all(|c| letters.next() == Some(c))
}

/// True if both strings are equal after folding.
#[must_use]
pub fn folded_eq(left: &str, right: &str) -> bool {
    left.chars().map(fold).eq(right.chars().map(fold))
}
