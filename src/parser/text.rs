// file: src/parser/text.rs
// description: HTML to plain text conversion for filing documents
// reference: https://docs.rs/scraper

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html, Node};

lazy_static! {
    static ref INLINE_SPACE: Regex = Regex::new(r"[ \t\r\f\u{a0}]+").expect("INLINE_SPACE regex is valid");

    static ref BLANK_LINES: Regex = Regex::new(r"\n\s*\n(?:\s*\n)+").expect("BLANK_LINES regex is valid");
}

/// Elements whose text never reaches the output.
const SKIPPED: &[&str] = &["head", "script", "style", "noscript", "template"];

/// Elements that start and end on their own line.
const BLOCKS: &[&str] = &[
    "address", "article", "blockquote", "br", "caption", "dd", "div", "dl", "dt", "h1", "h2",
    "h3", "h4", "h5", "h6", "hr", "li", "ol", "p", "pre", "section", "table", "tbody", "tfoot",
    "thead", "tr", "ul",
];

/// Table cells are separated by a space so neighbouring cells stay distinct words.
const CELLS: &[&str] = &["td", "th"];

pub fn looks_like_html(content: &str) -> bool {
    let head: String = content.chars().take(2048).collect::<String>().to_lowercase();
    head.contains("<html") || head.contains("<body") || head.contains("<div") || head.contains("<p")
}

/// Text content of an HTML document. Block elements become line breaks,
/// table cells become spaces and inline tags vanish without a separator.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::with_capacity(html.len() / 2);
    collect_text(document.root_element(), &mut out);
    normalize_whitespace(&out)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if SKIPPED.contains(&name) {
        return;
    }

    let separator = if BLOCKS.contains(&name) {
        Some('\n')
    } else if CELLS.contains(&name) {
        Some(' ')
    } else {
        None
    };

    if let Some(sep) = separator {
        push_separator(out, sep);
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    if let Some(sep) = separator {
        push_separator(out, sep);
    }
}

fn push_separator(out: &mut String, sep: char) {
    let redundant = match sep {
        '\n' => out.ends_with('\n'),
        _ => out.is_empty() || out.ends_with(char::is_whitespace),
    };
    if !redundant {
        out.push(sep);
    }
}

pub fn normalize_whitespace(text: &str) -> String {
    let text = INLINE_SPACE.replace_all(text, " ");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::{MatchMode, TextMatcher};

    #[test]
    fn test_strips_tags_and_scripts() {
        let html = r#"<html><head><style>p { color: red }</style><script>var merger = 1;</script></head>
            <body><p>Agreement and <b>Plan</b> of Merger</p><div>Second&nbsp;block</div></body></html>"#;
        let text = html_to_text(html);
        assert_eq!(text, "Agreement and Plan of Merger\nSecond block");
    }

    #[test]
    fn test_decodes_entities() {
        assert_eq!(html_to_text("AT&amp;T&#8217;s spin&#x2D;off"), "AT&T\u{2019}s spin-off");
        assert_eq!(html_to_text("a&#160;b"), "a b");
    }

    #[test]
    fn test_inline_tags_do_not_split_words() {
        assert_eq!(html_to_text("<font>M</font>erger"), "Merger");
    }

    #[test]
    fn test_table_cells_stay_separate_words() {
        let html = "<html><body><table><tr><td>Merger</td><td>Sub</td></tr>\
                    <tr><th>Acquisition</th><td>Date</td></tr></table></body></html>";
        let text = html_to_text(html);
        assert_eq!(text, "Merger Sub\nAcquisition Date");

        let both = MatchMode::TwoTerm { require_both: true };
        assert!(TextMatcher::default().matches(Some(text.as_str()), both));
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(html_to_text("<p>first<br>second</p><p>third</p>"), "first\nsecond\nthird");
    }

    #[test]
    fn test_collapses_blank_lines() {
        assert_eq!(normalize_whitespace("a  \n\n\n\n  b\t\tc"), "a\n\nb c");
    }

    #[test]
    fn test_looks_like_html() {
        assert!(looks_like_html("<HTML><BODY>x</BODY></HTML>"));
        assert!(!looks_like_html("plain text filing body"));
    }
}
