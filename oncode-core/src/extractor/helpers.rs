//! Helper functions for DOM navigation.
//!
//! Every read here is total: a bad selector or a missing element yields an
//! empty string or an empty list instead of an error.

use scraper::{ElementRef, Selector};

/// Parse a CSS selector, logging and returning `None` if it is invalid.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            tracing::warn!(selector = css, "Invalid CSS selector: {:?}", e);
            None
        }
    }
}

/// First descendant of `scope` matching `css`.
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    scope.select(&sel).next()
}

/// All descendants of `scope` matching `css`, in document order.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match selector(css) {
        Some(sel) => scope.select(&sel).collect(),
        None => Vec::new(),
    }
}

/// DOM `textContent`: all descendant text, concatenated, untrimmed.
pub fn text_content(element: ElementRef) -> String {
    element.text().collect()
}

/// Text of the first match, or empty.
pub fn first_text(scope: ElementRef, css: &str) -> String {
    select_first(scope, css)
        .map(text_content)
        .unwrap_or_default()
}

/// Text of an optional selector's first match, or empty.
pub fn optional_text(scope: ElementRef, css: Option<&str>) -> String {
    css.map(|css| first_text(scope, css)).unwrap_or_default()
}

/// Texts of every match, in document order.
pub fn all_text(scope: ElementRef, css: &str) -> Vec<String> {
    select_all(scope, css).into_iter().map(text_content).collect()
}

/// Following element sibling, skipping text and comment nodes.
pub fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

/// Check an element's tag name (case-insensitive).
pub fn is_tag(element: ElementRef, name: &str) -> bool {
    element.value().name().eq_ignore_ascii_case(name)
}

/// Remove the first occurrence of `needle` from `haystack` and trim.
pub fn strip_first(haystack: &str, needle: &str) -> String {
    if needle.is_empty() {
        return haystack.trim().to_string();
    }
    haystack.replacen(needle, "", 1).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_text_content_is_untrimmed() {
        let doc = Html::parse_fragment("<div id=\"x\">  a <b>b</b>\n</div>");
        let div = select_first(doc.root_element(), "#x").unwrap();
        assert_eq!(text_content(div), "  a b\n");
    }

    #[test]
    fn test_missing_and_invalid_selectors_are_empty() {
        let doc = Html::parse_fragment("<p>x</p>");
        let root = doc.root_element();
        assert_eq!(first_text(root, ".nope"), "");
        assert_eq!(first_text(root, "[[["), "");
        assert!(all_text(root, "[[[").is_empty());
        assert_eq!(optional_text(root, None), "");
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let doc = Html::parse_fragment("<h3>T</h3>\n  text <p>body</p>");
        let h3 = select_first(doc.root_element(), "h3").unwrap();
        let next = next_element_sibling(h3).unwrap();
        assert!(is_tag(next, "p"));
        assert_eq!(text_content(next), "body");
    }

    #[test]
    fn test_strip_first() {
        assert_eq!(strip_first("Input\nN M\n", "Input"), "N M");
        assert_eq!(strip_first("Input Input", "Input"), "Input");
        assert_eq!(strip_first("  x  ", ""), "x");
    }
}
