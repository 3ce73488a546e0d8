// ABOUTME: Line-break conversion applied to rich-text fragments before markup conversion.
// ABOUTME: Every <br> variant becomes a literal newline that later stages keep verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches `<br>`, `<br/>`, `<br />`, `<BR class="x">` and friends, plus one
/// source line break directly after the tag.
static BR_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\b[^>]*>(?:\r?\n)?").unwrap());

/// Quick check before running the regex.
fn has_br(html: &str) -> bool {
    let bytes = html.as_bytes();
    bytes
        .windows(3)
        .any(|w| w[0] == b'<' && w[1].eq_ignore_ascii_case(&b'b') && w[2].eq_ignore_ascii_case(&b'r'))
}

/// Replace every line-break element with `\n`.
///
/// A newline that directly follows the tag in the source is swallowed, so
/// `"a<br />\nb"` and `"a<br>b"` both become `"a\nb"`.
pub fn br_to_newline(html: &str) -> String {
    if !has_br(html) {
        return html.to_string();
    }
    BR_TAG.replace_all(html, "\n").into_owned()
}
