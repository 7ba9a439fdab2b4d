//! Markup stripper built on the html5ever parser behind `scraper`.

use scraper::{Html, Node};

use phez_core::ports::TextSanitizer;

/// Elements whose text is never user-visible content.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Full sanitizer: parses the input as an HTML fragment and keeps only
/// its text, re-escaped so the result is safe to embed and stable under
/// repeated sanitizing.
///
/// Carriage returns that survive parsing (for example from a `&#13;`
/// reference) come out as `&#13;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlStripper;

impl HtmlStripper {
    pub fn new() -> Self {
        Self
    }
}

impl TextSanitizer for HtmlStripper {
    fn sanitize(&self, text: &str) -> String {
        let fragment = Html::parse_fragment(text);
        let mut plain = String::with_capacity(text.len());

        for node in fragment.root_element().descendants() {
            let Node::Text(chunk) = node.value() else {
                continue;
            };

            let hidden = node
                .parent()
                .and_then(|parent| parent.value().as_element())
                .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()));
            if hidden {
                continue;
            }

            escape_into(&mut plain, chunk);
        }

        plain
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
}
