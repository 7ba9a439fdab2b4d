//! Text transformation ports.

/// Strips markup from user text, leaving escaped plain text.
///
/// Implementations must be idempotent: sanitizing sanitized text is a no-op.
pub trait TextSanitizer: Send + Sync {
    fn sanitize(&self, text: &str) -> String;
}

/// Markdown extensions a render call asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Single newlines become `<br>`.
    pub hard_wrap: bool,
    /// Bare URLs become links.
    pub autolink: bool,
    pub tables: bool,
}

impl MarkdownOptions {
    /// Options used for post bodies.
    pub fn post_body() -> Self {
        Self {
            hard_wrap: true,
            autolink: true,
            tables: true,
        }
    }
}

/// Converts plain markdown text to HTML at display time.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, text: &str, options: MarkdownOptions) -> String;
}
