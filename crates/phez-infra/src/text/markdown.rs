//! Markdown rendering through comrak.

use phez_core::ports::{MarkdownOptions, MarkdownRenderer};

/// CommonMark renderer with the GitHub-style extensions posts use.
///
/// Raw HTML in the source is not passed through.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComrakRenderer;

impl ComrakRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, text: &str, options: MarkdownOptions) -> String {
        let mut comrak_options = comrak::Options::default();
        comrak_options.render.hardbreaks = options.hard_wrap;
        comrak_options.extension.autolink = options.autolink;
        comrak_options.extension.table = options.tables;

        comrak::markdown_to_html(text, &comrak_options)
    }
}
