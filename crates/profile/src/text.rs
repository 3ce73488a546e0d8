// ABOUTME: Pure text cleansing helpers shared by the query layer and the rich-text pipeline.
// ABOUTME: Whitespace normalization, control character stripping, and the final cleanse pass.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static RE_SPACE_AROUND_NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?\n ?").unwrap());
static RE_BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops control characters except `\n` and `\t`, maps `\r\n`/`\r` to `\n`
/// and non-breaking spaces to plain spaces.
pub fn strip_control_chars(s: &str) -> String {
    let unified = s.replace("\r\n", "\n").replace('\r', "\n");
    unified
        .chars()
        .filter_map(|c| match c {
            '\n' | '\t' => Some(c),
            '\u{a0}' => Some(' '),
            c if c.is_control() => None,
            // zero-width space, BOM
            '\u{200b}' | '\u{feff}' => None,
            c => Some(c),
        })
        .collect()
}

/// Final cleanup for converted rich text.
///
/// Strips control characters, collapses runs of spaces and tabs, removes
/// spaces hugging line breaks, keeps at most one blank line between blocks
/// and trims the ends. Applying it twice yields the same text as applying
/// it once.
pub fn cleanse(s: &str) -> String {
    let stripped = strip_control_chars(s);
    let spaced = RE_SPACES.replace_all(&stripped, " ");
    let hugged = RE_SPACE_AROUND_NEWLINE.replace_all(&spaced, "\n");
    let collapsed = RE_BLANK_LINES.replace_all(&hugged, "\n\n");
    collapsed.trim().to_string()
}
