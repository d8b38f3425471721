//! Minimal markdown preview renderer.
//!
//! # Responsibility
//! - Turn a note body into an HTML fragment for the preview pane.
//! - Strip markdown markers for plain-text rendering paths (PDF export).
//!
//! # Invariants
//! - Stage order is fixed: escape `&` then `<`, headings longest-first,
//!   bold, italic, inline code, paragraph/line breaks, outer wrap. Changing
//!   the order changes the output contract.
//! - Only `&` and `<` are escaped. This is a preview convenience for
//!   user-authored text, not a general HTML sanitizer; hosts embedding the
//!   fragment elsewhere must sanitize themselves.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RULES: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    // Longest marker first so `###` is not consumed by the `#` rule.
    (1..=6usize)
        .rev()
        .map(|level| {
            let marker = "#".repeat(level);
            let pattern =
                Regex::new(&format!(r"(?m)^{marker} (.*)$")).expect("valid heading regex");
            (pattern, format!("<h{level}>$1</h{level}>"))
        })
        .collect()
});

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("valid italic regex"));
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+?)`").expect("valid code regex"));
static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").expect("valid para regex"));
static HEADING_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6} +").expect("valid heading marker regex"));

/// Renders the supported markdown subset to an HTML fragment.
///
/// Supported: `#`..`######` headings, `**bold**`, `*italic*`,
/// `` `inline code` ``, paragraph breaks on blank lines, `<br/>` on single
/// newlines. No lists, links, tables, or nested emphasis guarantees.
pub fn markdown_to_html(src: &str) -> String {
    let mut out = src.replace('&', "&amp;").replace('<', "&lt;");

    for (pattern, replacement) in HEADING_RULES.iter() {
        out = pattern.replace_all(&out, replacement.as_str()).into_owned();
    }

    out = BOLD_RE.replace_all(&out, "<strong>$1</strong>").into_owned();
    out = ITALIC_RE.replace_all(&out, "<em>$1</em>").into_owned();
    out = CODE_RE
        .replace_all(&out, "<code class=\"inline-code\">$1</code>")
        .into_owned();

    out = PARAGRAPH_RE.replace_all(&out, "</p><p>").into_owned();
    out = out.replace('\n', "<br/>");

    format!("<p>{out}</p>")
}

/// Removes the markdown markers of the preview subset, leaving plain text.
pub fn strip_markdown(src: &str) -> String {
    let out = HEADING_MARKER_RE.replace_all(src, "");
    let out = BOLD_RE.replace_all(&out, "$1");
    let out = ITALIC_RE.replace_all(&out, "$1");
    CODE_RE.replace_all(&out, "$1").into_owned()
}
