//! Pure formatting rules for post fields: slugs, link normalization,
//! link encoding and display domains.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Slug used when a title has no slug-safe characters at all.
pub const FALLBACK_GUID: &str = "post";

/// Domain shown for self posts.
pub const SELF_DOMAIN: &str = "self";

/// Domain shown when a link cannot be parsed.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Form-encoding: everything but alphanumerics and `_ . - ~` is escaped.
const FORM_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .add(b' ');

/// Derive the permalink slug from a title.
///
/// The title is lowercased, spaces become hyphens, and every character
/// outside `[0-9a-z- ]` is dropped.
pub fn derive_guid(title: &str) -> String {
    let guid: String = title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| matches!(c, '0'..='9' | 'a'..='z' | '-' | ' '))
        .collect();

    if guid.is_empty() {
        FALLBACK_GUID.to_string()
    } else {
        guid
    }
}

/// Prefix `http://` onto links that mention neither scheme.
///
/// The check is a substring match, so a link that merely contains
/// `http://` somewhere is left untouched.
pub fn format_url(url: &str) -> String {
    if url.trim().is_empty() || url.contains("http://") || url.contains("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Form-encode a link for embedding in query strings. Spaces become `+`.
pub fn encode_url(url: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }

    // '%' is always escaped, so "%20" in the output can only be a space.
    utf8_percent_encode(url, FORM_SET)
        .to_string()
        .replace("%20", "+")
}

/// Host of a link with a leading `www.` removed, or `"unknown"`.
pub fn link_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.is_empty() => host.strip_prefix("www.").unwrap_or(host).to_string(),
            _ => UNKNOWN_DOMAIN.to_string(),
        },
        Err(_) => UNKNOWN_DOMAIN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_guid_from_simple_title() {
        assert_eq!(derive_guid("Hello World!"), "hello-world");
    }

    #[test]
    fn test_guid_keeps_digits_and_hyphens() {
        assert_eq!(derive_guid("Rust 2024 - Edition"), "rust-2024---edition");
    }

    #[test]
    fn test_guid_drops_non_ascii_letters() {
        assert_eq!(derive_guid("Café Über"), "caf-ber");
    }

    #[test]
    fn test_guid_falls_back_when_empty() {
        assert_eq!(derive_guid("!!!"), FALLBACK_GUID);
        assert_eq!(derive_guid("日本語"), FALLBACK_GUID);
        assert_eq!(derive_guid(""), FALLBACK_GUID);
    }

    #[test]
    fn test_guid_of_escaped_ampersand() {
        assert_eq!(derive_guid("Tom &amp; Jerry"), "tom-amp-jerry");
    }

    #[test]
    fn test_format_url_adds_http() {
        assert_eq!(format_url("example.com/page"), "http://example.com/page");
    }

    #[test]
    fn test_format_url_keeps_existing_scheme() {
        assert_eq!(format_url("https://example.com"), "https://example.com");
        assert_eq!(format_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_format_url_substring_anywhere_counts() {
        assert_eq!(
            format_url("see http://example.com"),
            "see http://example.com"
        );
        assert_eq!(
            format_url("example.com/?next=https://other.org"),
            "example.com/?next=https://other.org"
        );
    }

    #[test]
    fn test_format_url_blank_is_untouched() {
        assert_eq!(format_url(""), "");
        assert_eq!(format_url("   "), "   ");
    }

    #[test]
    fn test_encode_url() {
        assert_eq!(
            encode_url("http://example.com/a b?x=1&y=~z"),
            "http%3A%2F%2Fexample.com%2Fa+b%3Fx%3D1%26y%3D~z"
        );
    }

    #[test]
    fn test_encode_url_keeps_literal_percent_distinct_from_space() {
        assert_eq!(encode_url("a%20b c"), "a%2520b+c");
    }

    #[test]
    fn test_encode_blank_url() {
        assert_eq!(encode_url(""), "");
        assert_eq!(encode_url("  "), "");
    }

    #[test]
    fn test_domain_strips_www() {
        assert_eq!(link_domain("https://www.example.com/x"), "example.com");
    }

    #[test]
    fn test_domain_keeps_other_subdomains() {
        assert_eq!(link_domain("http://blog.example.com/"), "blog.example.com");
        assert_eq!(link_domain("http://wwww.example.com/"), "wwww.example.com");
    }

    #[test]
    fn test_domain_unknown_on_parse_failure() {
        assert_eq!(link_domain("not a url"), UNKNOWN_DOMAIN);
        assert_eq!(link_domain("http://"), UNKNOWN_DOMAIN);
        assert_eq!(link_domain(""), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_domain_unknown_without_host() {
        assert_eq!(link_domain("mailto:someone@example.com"), UNKNOWN_DOMAIN);
    }

    proptest! {
        #[test]
        fn guid_is_always_slug_safe(title in "\\PC{0,60}") {
            let guid = derive_guid(&title);
            prop_assert!(!guid.is_empty());
            prop_assert!(guid
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || c == '-'));
        }

        #[test]
        fn guid_of_plain_words_joins_with_hyphens(
            words in prop::collection::vec("[a-zA-Z0-9]{1,8}", 1..6),
        ) {
            let title = words.join(" ");
            prop_assert_eq!(derive_guid(&title), title.to_lowercase().replace(' ', "-"));
        }

        #[test]
        fn schemeless_urls_get_exactly_one_prefix(
            host in "[a-z0-9]{1,12}\\.[a-z]{2,3}",
            path in "[a-z0-9/]{0,20}",
        ) {
            let raw = format!("{host}/{path}");
            prop_assert_eq!(format_url(&raw), format!("http://{raw}"));
        }

        #[test]
        fn urls_with_scheme_are_unchanged(
            prefix in "[a-z ]{0,5}",
            scheme in prop::sample::select(vec!["http://", "https://"]),
            rest in "[a-z0-9./]{0,20}",
        ) {
            let raw = format!("{prefix}{scheme}{rest}");
            prop_assert_eq!(format_url(&raw), raw);
        }

        #[test]
        fn encoded_url_is_query_safe(raw in "\\PC{1,40}") {
            let encoded = encode_url(&raw);
            prop_assert!(encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "_.-~+%".contains(c)));
        }
    }
}
