//! Slug formatting.
//!
//! Location and service names travel through URLs in two directions:
//! names become slugs (`"Culver City"` -> `culver-city`) and slugs become
//! labels (`ev-charger-installation` -> `"Ev Charger Installation"`).

use deunicode::deunicode;

/// Convert a display name into a URL slug.
///
/// Transliterates to ASCII, lowercases, and collapses every run of
/// non-alphanumeric characters into a single `-`.
///
/// # Examples
/// ```ignore
/// assert_eq!(slugify("Culver City"), "culver-city");
/// assert_eq!(slugify("La Cañada Flintridge"), "la-canada-flintridge");
/// ```
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Turn a dash-separated slug into a label by capitalizing each word.
///
/// Only the first character of each word changes, so `ev` becomes `Ev`
/// and `av` becomes `Av`. Use explicit display-name overrides for acronyms.
pub fn title_case_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character of a word.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
