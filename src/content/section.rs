//! Content sections of landing and about pages.
//!
//! Section text is stored as loosely formatted plain text: blank lines
//! separate blocks and `•`/`-`/`*` lines are list items. The CMS export also
//! repeats headings and subheadings inside the text, and sometimes repeats the
//! last list item as a paragraph right after the list. All of that is
//! normalized away here so the renderer gets clean blocks.

use serde::{Deserialize, Serialize, Serializer};

use crate::store::SectionRow;
use crate::utils::html::{decode_entities, strip_tags};

/// Section type as stored in `section_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionKind {
    InfoCard,
    Content,
    Table,
    List,
    HowWeHelp,
    Other(String),
}

impl SectionKind {
    /// Parse a stored type. A missing type is plain content.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(str::trim).unwrap_or("content") {
            "info_card" => Self::InfoCard,
            "content" | "content_block" | "" => Self::Content,
            "table" | "comparison_table" => Self::Table,
            "list" => Self::List,
            "how_we_help" => Self::HowWeHelp,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InfoCard => "info_card",
            Self::Content => "content",
            Self::Table => "table",
            Self::List => "list",
            Self::HowWeHelp => "how_we_help",
            Self::Other(s) => s,
        }
    }
}

impl Serialize for SectionKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A paragraph or a bullet list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Block {
    Paragraph(String),
    List(Vec<String>),
}

impl Block {
    fn plain_text(&self) -> String {
        match self {
            Self::Paragraph(text) => text.clone(),
            Self::List(items) => items.join(" "),
        }
    }
}

/// Table payload stored as JSON in `table_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Indices of rows whose width differs from the header count.
    pub fn ragged_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != self.headers.len())
            .map(|(i, _)| i)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub body: Vec<Block>,
    /// Tag-free body text for card descriptions.
    pub summary: Option<String>,
    pub table: Option<TableData>,
}

impl Section {
    /// Normalize a stored section. Fails only on malformed table JSON.
    pub fn from_row(row: &SectionRow) -> Result<Self, serde_json::Error> {
        let heading = non_empty(row.heading.as_deref());
        let subheading = non_empty(row.subheading.as_deref());

        let table = match non_empty(row.table_data.as_deref()) {
            Some(json) => serde_json::from_str::<Option<TableData>>(&json)?,
            None => None,
        };

        let text = row
            .content
            .as_deref()
            .map(decode_entities)
            .unwrap_or_default();
        let text = strip_subheading(&text, subheading.as_deref());
        let text = strip_heading_line(text, heading.as_deref());
        let body = drop_repeated_items(parse_blocks(text));

        let summary = body
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join(" ");
        let summary = non_empty(Some(strip_tags(&summary)));

        Ok(Self {
            kind: SectionKind::parse(row.section_type.as_deref()),
            heading,
            subheading,
            body,
            summary,
            table,
        })
    }

    #[inline]
    pub fn is_info_card(&self) -> bool {
        self.kind == SectionKind::InfoCard
    }
}

/// Rendering group of consecutive sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "sections", rename_all = "snake_case")]
pub enum LayoutItem {
    /// Two or more adjacent info cards.
    CardGrid(Vec<Section>),
    Single(Section),
}

impl LayoutItem {
    pub fn sections(&self) -> &[Section] {
        match self {
            Self::CardGrid(sections) => sections,
            Self::Single(section) => std::slice::from_ref(section),
        }
    }
}

/// Group runs of info cards into grids, keeping section order.
pub fn layout(sections: Vec<Section>) -> Vec<LayoutItem> {
    let mut items = Vec::with_capacity(sections.len());
    let mut run: Vec<Section> = Vec::new();

    fn flush(run: &mut Vec<Section>, items: &mut Vec<LayoutItem>) {
        match run.len() {
            0 => {}
            1 => items.extend(run.drain(..).map(LayoutItem::Single)),
            _ => items.push(LayoutItem::CardGrid(std::mem::take(run))),
        }
    }

    for section in sections {
        if section.is_info_card() {
            run.push(section);
        } else {
            flush(&mut run, &mut items);
            items.push(LayoutItem::Single(section));
        }
    }
    flush(&mut run, &mut items);

    items
}

/// Split text into paragraph and list blocks.
///
/// A blank line ends the current block. Consecutive identical list items
/// collapse into one.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list: Vec<String> = Vec::new();

    fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(paragraph.join("\n")));
            paragraph.clear();
        }
    }
    fn flush_list(list: &mut Vec<String>, blocks: &mut Vec<Block>) {
        if !list.is_empty() {
            blocks.push(Block::List(std::mem::take(list)));
        }
    }

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list, &mut blocks);
        } else if let Some(item) = list_item(line) {
            flush_paragraph(&mut paragraph, &mut blocks);
            if !item.is_empty() && list.last().is_none_or(|last| last != item) {
                list.push(item.to_string());
            }
        } else {
            flush_list(&mut list, &mut blocks);
            paragraph.push(line);
        }
    }
    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut list, &mut blocks);

    blocks
}

/// Text of a bullet line, or `None` for ordinary text.
fn list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('•') {
        return Some(rest.trim());
    }
    let rest = line.strip_prefix(['-', '*'])?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// Strip a leading `"{subheading} | "`.
fn strip_subheading<'a>(text: &'a str, subheading: Option<&str>) -> &'a str {
    subheading
        .and_then(|sub| text.trim_start().strip_prefix(sub))
        .and_then(|rest| rest.trim_start().strip_prefix('|'))
        .map_or(text, str::trim_start)
}

/// Drop the first non-blank line when it repeats the heading.
fn strip_heading_line<'a>(text: &'a str, heading: Option<&str>) -> &'a str {
    let Some(heading) = heading else {
        return text;
    };
    let trimmed = text.trim_start();
    let (first, rest) = trimmed.split_once('\n').unwrap_or((trimmed, ""));
    if first.trim() == heading.trim() {
        rest
    } else {
        text
    }
}

/// Drop a paragraph that only repeats the last item of the list before it.
fn drop_repeated_items(blocks: Vec<Block>) -> Vec<Block> {
    let mut out: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        if let (Block::Paragraph(text), Some(Block::List(items))) = (&block, out.last())
            && items.last().is_some_and(|last| last == text.trim())
        {
            continue;
        }
        out.push(block);
    }
    out
}

/// Trim, and map an empty string to `None`.
pub fn non_empty<S: AsRef<str>>(s: Option<S>) -> Option<String> {
    let s = s?;
    let trimmed = s.as_ref().trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Decode entities, trim, and map an empty string to `None`.
pub fn decoded<S: AsRef<str>>(s: Option<S>) -> Option<String> {
    non_empty(s.as_ref().map(|s| decode_entities(s.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kind: &str, heading: &str, sub: &str, content: &str) -> SectionRow {
        SectionRow {
            section_type: Some(kind.into()),
            heading: Some(heading.into()),
            subheading: Some(sub.into()),
            content: Some(content.into()),
            table_data: None,
        }
    }

    #[test]
    fn test_parse_blocks() {
        let blocks = parse_blocks("Intro line\nsecond line\n\n• One\n• One\n- Two\n\nOutro");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph("Intro line\nsecond line".into()),
                Block::List(vec!["One".into(), "Two".into()]),
                Block::Paragraph("Outro".into()),
            ]
        );
    }

    #[test]
    fn test_dash_without_space_is_text() {
        let blocks = parse_blocks("-40% on lighting bills");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("-40% on lighting bills".into())]
        );
    }

    #[test]
    fn test_heading_and_subheading_repeats_dropped() {
        let section = Section::from_row(&row(
            "content",
            "Industries We Serve",
            "",
            "Industries We Serve\n\n• Retail\n• Warehouses",
        ))
        .unwrap();
        assert_eq!(
            section.body,
            vec![Block::List(vec!["Retail".into(), "Warehouses".into()])]
        );

        let card = Section::from_row(&row(
            "info_card",
            "DC Fast Chargers",
            "The Future of Rapid EV Charging",
            "The Future of Rapid EV Charging | DC Fast Chargers charge in half an hour.",
        ))
        .unwrap();
        assert_eq!(
            card.body,
            vec![Block::Paragraph(
                "DC Fast Chargers charge in half an hour.".into()
            )]
        );
        assert_eq!(
            card.summary.as_deref(),
            Some("DC Fast Chargers charge in half an hour.")
        );
    }

    #[test]
    fn test_repeated_last_item_paragraph_dropped() {
        let section = Section::from_row(&row(
            "content",
            "Services",
            "",
            "• Code Compliance: NEC checks\n• Grant Applications: paperwork\n\nGrant Applications: paperwork\n\nCall us.",
        ))
        .unwrap();
        assert_eq!(section.body.len(), 2);
        assert_eq!(section.body[1], Block::Paragraph("Call us.".into()));
    }

    #[test]
    fn test_empty_strings_become_none() {
        let section = Section::from_row(&row("info_card", "  ", "", "")).unwrap();
        assert_eq!(section.heading, None);
        assert_eq!(section.subheading, None);
        assert!(section.body.is_empty());
        assert_eq!(section.summary, None);
    }

    #[test]
    fn test_summary_strips_tags_and_entities() {
        let section =
            Section::from_row(&row("content", "", "", "<b>Save</b> 50&#037; &amp; more")).unwrap();
        assert_eq!(section.summary.as_deref(), Some("Save 50% & more"));
    }

    #[test]
    fn test_table_parsing() {
        let mut r = row("table", "", "", "");
        r.table_data = Some(r#"{"headers":["A","B"],"rows":[["1","2"],["3"]]}"#.into());
        let section = Section::from_row(&r).unwrap();
        assert_eq!(section.kind, SectionKind::Table);
        let table = section.table.unwrap();
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.ragged_rows(), vec![1]);

        r.section_type = Some("comparison_table".into());
        assert_eq!(Section::from_row(&r).unwrap().kind, SectionKind::Table);

        r.table_data = Some("{not json".into());
        assert!(Section::from_row(&r).is_err());

        r.table_data = Some("null".into());
        assert_eq!(Section::from_row(&r).unwrap().table, None);
    }

    #[test]
    fn test_section_kinds() {
        assert_eq!(SectionKind::parse(Some("content_block")), SectionKind::Content);
        assert_eq!(SectionKind::parse(Some("how_we_help")), SectionKind::HowWeHelp);
        assert_eq!(SectionKind::parse(None), SectionKind::Content);
        assert_eq!(SectionKind::parse(Some("comparison_table")), SectionKind::Table);
        assert_eq!(SectionKind::parse(Some("list")), SectionKind::List);
        assert_eq!(serde_json::to_value(SectionKind::List).unwrap(), "list");
        assert_eq!(
            SectionKind::parse(Some("video")),
            SectionKind::Other("video".into())
        );
        assert_eq!(
            serde_json::to_value(SectionKind::InfoCard).unwrap(),
            "info_card"
        );
    }

    #[test]
    fn test_layout_groups_card_runs() {
        let make = |kind: &str| Section::from_row(&row(kind, "h", "", "body")).unwrap();
        let sections = vec![
            make("info_card"),
            make("info_card"),
            make("info_card"),
            make("table"),
            make("info_card"),
            make("content"),
        ];
        let items = layout(sections);
        assert_eq!(items.len(), 4);
        assert!(matches!(&items[0], LayoutItem::CardGrid(cards) if cards.len() == 3));
        assert!(matches!(&items[1], LayoutItem::Single(s) if s.kind == SectionKind::Table));
        assert!(matches!(&items[2], LayoutItem::Single(s) if s.is_info_card()));
        assert!(matches!(&items[3], LayoutItem::Single(s) if s.kind == SectionKind::Content));
    }
}
