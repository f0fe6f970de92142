//! Markdown scanning for insight posts (no HTML rendering).

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use super::document::Heading;

/// Plain-text facts extracted from a post body.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PostScan {
    /// First paragraph with text, as plain text.
    pub summary: Option<String>,
    pub headings: Vec<Heading>,
    pub word_count: usize,
}

/// Scan markdown for the summary, headings and word count.
///
/// Image alt text is skipped, so a leading hero image does not become the
/// summary.
pub fn scan(markdown: &str) -> PostScan {
    let mut scan = PostScan::default();
    let mut heading: Option<(u8, String)> = None;
    let mut paragraph: Option<String> = None;
    let mut image_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((heading_level(level), String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    scan.headings.push(Heading {
                        level,
                        text: text.trim().to_string(),
                    });
                }
            }
            Event::Start(Tag::Paragraph) if scan.summary.is_none() => {
                paragraph = Some(String::new());
            }
            Event::End(TagEnd::Paragraph) => {
                if let Some(text) = paragraph.take() {
                    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !text.is_empty() {
                        scan.summary = Some(text);
                    }
                }
            }
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => {
                if image_depth > 0 {
                    continue;
                }
                scan.word_count += text.split_whitespace().count();
                if let Some((_, buf)) = heading.as_mut() {
                    buf.push_str(&text);
                } else if let Some(buf) = paragraph.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buf) = paragraph.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }

    scan
}

/// Site-root link targets in a markdown body.
pub fn extract_links(markdown: &str) -> Vec<String> {
    Parser::new(markdown)
        .filter_map(|event| match event {
            Event::Start(Tag::Link { dest_url, .. }) => Some(dest_url.into_string()),
            _ => None,
        })
        .collect()
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
