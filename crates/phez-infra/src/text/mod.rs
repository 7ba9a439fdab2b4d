//! Text adapters: markup stripping at save time, markdown at display time.

mod markdown;
mod sanitizer;

pub use markdown::ComrakRenderer;
pub use sanitizer::HtmlStripper;
