//! HTML output for body blocks

use super::markup::{Block, BlockKind, Segment};

/// Render blocks to HTML, one element per block.
///
/// Consecutive list items share one `<ul>`.
pub fn render_blocks(blocks: &[Block]) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for block in blocks {
        let is_item = block.kind == BlockKind::ListItem;
        if in_list && !is_item {
            html.push_str("</ul>\n");
            in_list = false;
        }

        let inner = render_segments(&block.segments);
        match block.kind {
            BlockKind::Heading => {
                html.push_str(&format!("<h2 class=\"body-heading\">{}</h2>\n", inner));
            }
            BlockKind::BoldParagraph => {
                html.push_str(&format!("<p class=\"body-lead\">{}</p>\n", inner));
            }
            BlockKind::ListItem => {
                if !in_list {
                    html.push_str("<ul class=\"body-list\">\n");
                    in_list = true;
                }
                html.push_str(&format!("<li>{}</li>\n", inner));
            }
            BlockKind::Paragraph => {
                html.push_str(&format!("<p>{}</p>\n", inner));
            }
        }
    }

    if in_list {
        html.push_str("</ul>\n");
    }

    html
}

fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| {
            if s.emphasized {
                format!("<strong>{}</strong>", html_escape(&s.text))
            } else {
                html_escape(&s.text)
            }
        })
        .collect()
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
