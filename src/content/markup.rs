//! Body micro-syntax: line classification and inline emphasis
//!
//! Record bodies are plain text where each line is one element:
//!
//! ```text
//! ## Heading
//! **A whole line in bold**
//! - list item
//! plain paragraph, may contain **inline emphasis**
//! ```
//!
//! Blank lines are skipped. There is no nesting and no multi-line element.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

const HEADING_PREFIX: &str = "## ";
const LIST_PREFIX: &str = "- ";
const EMPHASIS: &str = "**";

lazy_static! {
    static ref EMPHASIS_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
}

/// The category a single body line falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Heading(&'a str),
    BoldParagraph(&'a str),
    ListItem(&'a str),
    PlainParagraph(&'a str),
    Skip,
}

/// Classify one line. Rules are tried in order; the first match wins.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(text) = line.strip_prefix(HEADING_PREFIX) {
        return LineKind::Heading(text);
    }

    if let Some(text) = bold_paragraph_text(line) {
        return LineKind::BoldParagraph(text);
    }

    if let Some(text) = line.strip_prefix(LIST_PREFIX) {
        return LineKind::ListItem(text);
    }

    if !line.trim().is_empty() {
        return LineKind::PlainParagraph(line);
    }

    LineKind::Skip
}

/// `**text**` with no other delimiter inside
fn bold_paragraph_text(line: &str) -> Option<&str> {
    // A bare "**" or "***" would have its opening and closing pairs overlap
    if line.len() < EMPHASIS.len() * 2 {
        return None;
    }
    let inner = line.strip_prefix(EMPHASIS)?.strip_suffix(EMPHASIS)?;
    if inner.contains(EMPHASIS) {
        return None;
    }
    Some(inner)
}

/// A run of text that is either plain or emphasized
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Split text on `**…**` pairs, keeping order.
///
/// An unmatched `**` stays in the surrounding plain text.
pub fn split_emphasis(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in EMPHASIS_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::plain(&text[last..whole.start()]));
        }
        segments.push(Segment::emphasized(inner.as_str()));
        last = whole.end();
    }

    if last < text.len() || segments.is_empty() {
        segments.push(Segment::plain(&text[last..]));
    }

    segments
}

/// Rendering category of a [`Block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    BoldParagraph,
    ListItem,
    Paragraph,
}

/// One body element ready for a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub kind: BlockKind,
    pub segments: Vec<Segment>,
}

impl Block {
    /// Plain text of the block with delimiters removed
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Turn a whole body into blocks, in line order, dropping skipped lines
pub fn render_body(body: &str) -> Vec<Block> {
    body.lines().filter_map(render_line).collect()
}

fn render_line(line: &str) -> Option<Block> {
    let block = match classify_line(line) {
        LineKind::Heading(text) => Block {
            kind: BlockKind::Heading,
            segments: split_emphasis(text),
        },
        LineKind::BoldParagraph(text) => Block {
            kind: BlockKind::BoldParagraph,
            segments: vec![Segment::plain(text)],
        },
        LineKind::ListItem(text) => Block {
            kind: BlockKind::ListItem,
            segments: split_emphasis(text),
        },
        LineKind::PlainParagraph(text) => Block {
            kind: BlockKind::Paragraph,
            segments: split_emphasis(text),
        },
        LineKind::Skip => return None,
    };
    Some(block)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_heading() {
        assert_eq!(classify_line("## Key Features"), LineKind::Heading("Key Features"));
        // Empty heading is still a heading
        assert_eq!(classify_line("## "), LineKind::Heading(""));
        // No space after the hashes: plain text
        assert_eq!(classify_line("##Nope"), LineKind::PlainParagraph("##Nope"));
    }

    #[test]
    fn test_classify_bold_paragraph() {
        assert_eq!(
            classify_line("**Infrastructure as Code**"),
            LineKind::BoldParagraph("Infrastructure as Code")
        );
        assert_eq!(classify_line("****"), LineKind::BoldParagraph(""));
        assert_eq!(classify_line("**"), LineKind::PlainParagraph("**"));
        assert_eq!(classify_line("***"), LineKind::PlainParagraph("***"));
    }

    #[test]
    fn test_inner_pair_is_not_a_bold_paragraph() {
        let line = "**Serverless**: events, not **servers**";
        assert_eq!(classify_line(line), LineKind::PlainParagraph(line));
    }

    #[test]
    fn test_bold_wins_over_list() {
        assert_eq!(classify_line("**- x**"), LineKind::BoldParagraph("- x"));
        assert_eq!(classify_line("- **x**"), LineKind::ListItem("**x**"));
    }

    #[test]
    fn test_classify_list_plain_and_skip() {
        assert_eq!(classify_line("- GMAT score"), LineKind::ListItem("GMAT score"));
        assert_eq!(classify_line("-not a list"), LineKind::PlainParagraph("-not a list"));
        assert_eq!(classify_line("1. Define the decision"), LineKind::PlainParagraph("1. Define the decision"));
        assert_eq!(classify_line(""), LineKind::Skip);
        assert_eq!(classify_line("    "), LineKind::Skip);
        assert_eq!(classify_line("\t"), LineKind::Skip);
    }

    #[test]
    fn test_classification_is_total() {
        let cases = [
            ("", LineKind::Skip),
            ("##", LineKind::PlainParagraph("##")),
            ("- ", LineKind::ListItem("")),
            ("-", LineKind::PlainParagraph("-")),
            ("**a** b **c**", LineKind::PlainParagraph("**a** b **c**")),
            ("  - indented", LineKind::PlainParagraph("  - indented")),
        ];
        for (line, expected) in cases {
            assert_eq!(classify_line(line), expected, "line {:?}", line);
            assert_eq!(classify_line(line), classify_line(line));
        }
    }

    #[test]
    fn test_split_without_delimiters() {
        assert_eq!(split_emphasis("just text"), vec![Segment::plain("just text")]);
        assert_eq!(split_emphasis(""), vec![Segment::plain("")]);
    }

    #[test]
    fn test_split_leading_emphasis() {
        assert_eq!(
            split_emphasis("**bold** and plain"),
            vec![Segment::emphasized("bold"), Segment::plain(" and plain")]
        );
    }

    #[test]
    fn test_split_alternating() {
        assert_eq!(
            split_emphasis("a **b** c **d**"),
            vec![
                Segment::plain("a "),
                Segment::emphasized("b"),
                Segment::plain(" c "),
                Segment::emphasized("d"),
            ]
        );
    }

    #[test]
    fn test_split_unmatched_trailing_delimiter() {
        assert_eq!(split_emphasis("open **end"), vec![Segment::plain("open **end")]);
        assert_eq!(
            split_emphasis("**one** then **"),
            vec![Segment::emphasized("one"), Segment::plain(" then **")]
        );
    }

    #[test]
    fn test_render_sample_body() {
        let blocks = render_body("## Title\n- item one\n**Bold line**\nplain line");
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading,
                BlockKind::ListItem,
                BlockKind::BoldParagraph,
                BlockKind::Paragraph
            ]
        );
        let texts: Vec<_> = blocks.iter().map(Block::text).collect();
        assert_eq!(texts, vec!["Title", "item one", "Bold line", "plain line"]);
    }

    #[test]
    fn test_render_skips_blank_lines() {
        let blocks = render_body("\n\nfirst\n\n   \nsecond\n");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text(), "first");
        assert_eq!(blocks[1].text(), "second");
    }

    #[test]
    fn test_block_serializes_kind_as_snake_case() {
        let block = Block {
            kind: BlockKind::BoldParagraph,
            segments: vec![Segment::plain("x")],
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "bold_paragraph");
        assert_eq!(json["segments"][0]["emphasized"], false);
    }
}
