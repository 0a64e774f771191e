//! Summary ("keywords") extraction from newsletter HTML.
//!
//! Strategies, first non-empty result wins:
//! 1. `<meta name="soonsal-keywords" content="...">`
//! 2. `<h2 class="story-title">` headings, each cut at its em-dash
//! 3. `<title>` with the brand prefix removed
//! 4. `"Untitled"`

use scraper::{Html, Selector};

/// Returned when no strategy yields text
pub const UNTITLED: &str = "Untitled";

/// Story title length kept when a heading has no em-dash
const STORY_TITLE_CHARS: usize = 40;

const STORY_SEPARATORS: [&str; 2] = [" — ", "—"];
const BRAND_SEPARATORS: [&str; 4] = [" — ", " | ", "—", "|"];

/// Extract the summary used for index entries and commit messages
pub fn extract_keywords(html: &str) -> String {
    let doc = Html::parse_document(html);

    meta_keywords(&doc)
        .or_else(|| story_titles(&doc))
        .or_else(|| document_title(&doc))
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn meta_keywords(doc: &Html) -> Option<String> {
    let sel = Selector::parse(r#"meta[name="soonsal-keywords"]"#).ok()?;
    doc.select(&sel)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

fn story_titles(doc: &Html) -> Option<String> {
    let sel = Selector::parse(r#"h2[class="story-title"]"#).ok()?;
    let titles: Vec<String> = doc
        .select(&sel)
        .map(|el| shorten_story_title(&el.text().collect::<String>()))
        .collect();

    let joined = titles.join(", ");
    if joined.trim().is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn document_title(doc: &Html) -> Option<String> {
    let sel = Selector::parse("title").ok()?;
    let raw = doc.select(&sel).next()?.text().collect::<String>();
    let title = strip_brand(&strip_tags(&raw));
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Keep the part of a story heading before its em-dash, or its first
/// characters when there is none
fn shorten_story_title(text: &str) -> String {
    let clean = text.trim();
    for sep in STORY_SEPARATORS {
        if let Some((head, _)) = clean.split_once(sep) {
            return head.trim().to_string();
        }
    }
    clean
        .chars()
        .take(STORY_TITLE_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Drop a leading "brand — " or "brand | " from a page title
fn strip_brand(title: &str) -> String {
    let title = title.trim();
    for sep in BRAND_SEPARATORS {
        if let Some((_, rest)) = title.split_once(sep) {
            return rest.trim().to_string();
        }
    }
    title.to_string()
}

/// Remove anything that looks like a tag. `<title>` content is raw text to
/// the HTML parser, so markup written inside it survives parsing.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_story_title_at_dash() {
        assert_eq!(shorten_story_title(" 연준 금리 인하 — 시장 반응 "), "연준 금리 인하");
        assert_eq!(shorten_story_title("유가 급등—OPEC 감산"), "유가 급등");
    }

    #[test]
    fn test_shorten_story_title_truncates() {
        let long = "a".repeat(50);
        assert_eq!(shorten_story_title(&long), "a".repeat(40));
        let hangul = "가".repeat(45);
        assert_eq!(shorten_story_title(&hangul).chars().count(), 40);
    }

    #[test]
    fn test_strip_brand_separators() {
        assert_eq!(strip_brand("순살카드뉴스 — 이번 주 시황"), "이번 주 시황");
        assert_eq!(strip_brand("순살크립토 | 비트코인"), "비트코인");
        assert_eq!(strip_brand("No brand here"), "No brand here");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<b>Bold</b> move"), "Bold move");
        assert_eq!(strip_tags("a > b"), "a > b");
    }

    #[test]
    fn test_empty_meta_falls_through() {
        let html = r#"<html><head><meta name="soonsal-keywords" content="  "><title>X | Y</title></head></html>"#;
        assert_eq!(extract_keywords(html), "Y");
    }

    #[test]
    fn test_untitled_fallback() {
        assert_eq!(extract_keywords("<html><body><p>hi</p></body></html>"), UNTITLED);
    }
}
