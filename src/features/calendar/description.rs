//! Cleanup of calendar event descriptions.
//!
//! Google stores descriptions as an HTML fragment. Announcements want plain
//! text with markdown links, which Discord renders.

use regex::Regex;
use scraper::Html;
use std::sync::OnceLock;

fn line_break() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break pattern"))
}

fn anchor() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*"([^"]*)"[^>]*>(.*?)</a>"#)
            .expect("valid anchor pattern")
    })
}

/// Convert an HTML description to plain text.
///
/// Returns `None` when nothing but whitespace remains.
pub fn clean_description(raw: &str) -> Option<String> {
    let text = line_break().replace_all(raw, "\n");
    let text = text.replace("&nbsp;", " ");
    let text = anchor().replace_all(&text, "[$2]($1)");

    let fragment = Html::parse_fragment(&text);
    let plain: String = fragment.root_element().text().collect();
    let plain = plain.trim();

    if plain.is_empty() {
        None
    } else {
        Some(plain.to_string())
    }
}
