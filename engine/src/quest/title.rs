//! Quest title canonicalization
//!
//! Catalog keys and every title comparison go through [`normalize_title`].
//! A letter is uppercased when the character before it is not a letter and
//! lowercased otherwise, so "cook's assistant" becomes "Cook'S Assistant",
//! matching the casing the reference tables were keyed with.

pub fn normalize_title(title: &str) -> String {
    let mut normalized = String::with_capacity(title.len());
    let mut previous_cased = false;

    for c in title.trim().chars() {
        if c.is_alphabetic() {
            if previous_cased {
                normalized.extend(c.to_lowercase());
            } else {
                normalized.extend(c.to_uppercase());
            }
            previous_cased = true;
        } else {
            normalized.push(c);
            previous_cased = false;
        }
    }

    normalized
}

/// Variant entries (miniquests, duplicates) carry a parenthesized suffix
pub fn is_variant_title(title: &str) -> bool {
    normalize_title(title).contains(['(', ')'])
}
