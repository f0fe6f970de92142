//! HTML text utilities.
//!
//! Content rows store text exported from a CMS, so titles and bodies arrive
//! with entity-encoded punctuation (`&#038;`, `&#039;`) and occasional markup.
//!
//! - `decode_entities()` - single-pass HTML entity decoding
//! - `strip_tags()` - remove `<...>` tags for plain-text summaries
//! - `extract_links()` - collect `href` targets from an HTML fragment

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Longest entity name we try to decode before giving up.
const MAX_ENTITY_LEN: usize = 10;

/// Decode HTML entities back to characters.
///
/// Handles the named entities the CMS export produces plus numeric and hex
/// character references. Decoding happens in one pass, so `&amp;lt;` becomes
/// `&lt;` rather than `<`. Unknown entities, NUL and surrogate references are
/// kept verbatim.
///
/// # Example
/// ```ignore
/// assert_eq!(decode_entities("Repairs &#038; Upgrades"), "Repairs & Upgrades");
/// assert_eq!(decode_entities("plain"), "plain"); // No allocation
/// ```
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];

        let decoded = after
            .find(';')
            .filter(|&end| end > 0 && end <= MAX_ENTITY_LEN)
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));

        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &after[end + 1..];
            }
            None => {
                result.push('&');
                rest = after;
            }
        }
    }
    result.push_str(rest);

    Cow::Owned(result)
}

/// Decode a single entity body (the text between `&` and `;`).
fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{00A0}'),
        "ndash" => Some('–'),
        "mdash" => Some('—'),
        "rsquo" => Some('’'),
        "lsquo" => Some('‘'),
        "rdquo" => Some('”'),
        "ldquo" => Some('“'),
        "hellip" => Some('…'),
        s => {
            let num = s.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => num.parse().ok(),
            };
            code.filter(|&c| c != 0).and_then(char::from_u32)
        }
    }
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Remove every `<...>` tag, keeping the text between them.
pub fn strip_tags(s: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(s, "")
}

/// Collect `href` values of every anchor in an HTML fragment.
///
/// Returns an empty list if the fragment cannot be parsed.
pub fn extract_links(html: &str) -> Vec<String> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };

    dom.nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .filter(|tag| tag.name().as_utf8_str().eq_ignore_ascii_case("a"))
        .filter_map(|tag| {
            tag.attributes()
                .get("href")
                .flatten()
                .map(|value| value.as_utf8_str().into_owned())
        })
        .filter(|href| !href.is_empty())
        .collect()
}
