//! Markup stripping for values that leave the store as plain text.
//!
//! Inputs are short product fields and rendered price fragments. The output
//! is guaranteed tag-free, not a faithful HTML-to-text rendering.

use std::sync::LazyLock;

use regex::Regex;

static SCRIPT_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?(?:-->|$)|<[A-Za-z/!?][^>]*(?:>|$)").expect("valid regex")
});
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n\t ]+").expect("valid regex"));
static OCTET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%[a-fA-F0-9]{2}").expect("valid regex"));

/// Removes every tag (and HTML comment) but keeps the text between them.
///
/// Whitespace is left untouched, so `"<span>$</span>10.00 "` becomes
/// `"$10.00 "`. Entities are not decoded.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Like [`strip_tags`], but also drops `<script>` and `<style>` elements
/// together with their contents and trims the result.
#[must_use]
pub fn strip_all_tags(html: &str) -> String {
    let without_blocks = SCRIPT_STYLE_RE.replace_all(html, "");
    strip_tags(&without_blocks).trim().to_string()
}

/// Reduces a form value to a single clean line.
///
/// Strips markup, collapses line breaks, tabs and runs of spaces into one
/// space, drops percent-encoded octets and trims.
#[must_use]
pub fn sanitize_text_field(value: &str) -> String {
    let stripped = strip_all_tags(value);
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    OCTET_RE.replace_all(&collapsed, "").trim().to_string()
}

/// Like [`sanitize_text_field`] but keeps line breaks, for multi-line fields.
#[must_use]
pub fn sanitize_textarea_field(value: &str) -> String {
    let stripped = strip_all_tags(&value.replace("\r\n", "\n"));
    stripped
        .lines()
        .map(|line| OCTET_RE.replace_all(line, "").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
