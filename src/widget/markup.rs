//! Text-to-markup for message bubbles. Not a markdown parser: a fixed list of
//! substitutions applied in order to HTML-escaped text.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("italic pattern"));

const HIGHLIGHTED_GLYPHS: [(&str, &str); 3] = [
    ("📞", r#"<span style="color: #dc3545; font-weight: bold;">📞</span>"#),
    ("🚨", r#"<span style="color: #dc3545; font-size: 1.2em;">🚨</span>"#),
    ("\u{26A0}\u{FE0F}", "<span style=\"color: #ffc107; font-weight: bold;\">\u{26A0}\u{FE0F}</span>"),
];

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn format_message(text: &str) -> String {
    let escaped = escape_html(text).replace('\n', "<br>");
    let bold = BOLD_RE.replace_all(&escaped, "<strong>$1</strong>");
    let mut html = ITALIC_RE.replace_all(&bold, "<em>$1</em>").into_owned();
    for (glyph, replacement) in HIGHLIGHTED_GLYPHS {
        html = html.replace(glyph, replacement);
    }
    html
}
