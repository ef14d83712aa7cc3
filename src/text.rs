use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Visible text of an element with every whitespace run (newlines and NBSP
/// included) collapsed to a single space.
pub fn element_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<Vec<_>>().join(" "))
}

/// Like [`element_text`] but text nodes are concatenated as-is, so inline
/// markup inside a word (`U.S.<em>-</em>China`) does not gain spaces.
pub fn inline_text(el: ElementRef<'_>) -> String {
    collapse_whitespace(&el.text().collect::<String>())
}

pub fn collapse_whitespace(s: &str) -> String {
    let s = s.replace('\u{00A0}', " ");
    RE_WHITESPACE.replace_all(&s, " ").trim().to_string()
}

// Remove characters XML 1.0 rejects: Cc controls other than tab, LF and CR,
// plus the U+FFFE/U+FFFF noncharacters.
pub fn sanitize_xml_text(input: &str) -> String {
    input
        .chars()
        .filter(|&c| {
            (matches!(c, '\t' | '\n' | '\r') || (c as u32) >= 0x20)
                && !matches!(c, '\u{FFFE}' | '\u{FFFF}')
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn collapses_newlines_and_nbsp() {
        assert_eq!(collapse_whitespace("  a\n\n b\u{00A0}\tc  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn joins_nested_text_nodes() {
        let doc = Html::parse_fragment("<div><p>One\n   two</p><p>three</p></div>");
        let sel = Selector::parse("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        assert_eq!(element_text(div), "One two three");
    }

    #[test]
    fn inline_markup_does_not_split_words() {
        let doc = Html::parse_fragment("<span>U.S.<em>-</em>China and <b>Taiwan</b>\n  ties</span>");
        let sel = Selector::parse("span").unwrap();
        let span = doc.select(&sel).next().unwrap();
        assert_eq!(inline_text(span), "U.S.-China and Taiwan ties");
    }

    #[test]
    fn strips_xml_noncharacters() {
        assert_eq!(sanitize_xml_text("a\u{FFFE}b\u{FFFF}c\u{FFFD}"), "abc\u{FFFD}");
    }

    #[test]
    fn strips_control_characters_only() {
        assert_eq!(sanitize_xml_text("a\u{0007}b\tc\nd"), "ab\tc\nd");
        assert_eq!(sanitize_xml_text("café — ok"), "café — ok");
    }
}
