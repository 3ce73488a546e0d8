// ABOUTME: Rich-text pipeline turning user-entered HTML fragments into portable markup.
// ABOUTME: br-to-newline, ammonia sanitizing, BBCode conversion, then the cleanse pass.

//! Output format conversion module.
//!
//! [`convert`] is the BBCode pipeline used for the profile "about" block.
//! [`render_about`] picks the pipeline for a configured [`AboutFormat`].
//! Every function here is total: any input string, including malformed
//! markup, produces a string.

pub mod bbcode;

use crate::dom::brs::br_to_newline;
use crate::options::AboutFormat;
use crate::text::cleanse;

/// Sanitize an HTML fragment with an ammonia allow-list of tags that have a
/// BBCode equivalent.
///
/// `script` and `style` are dropped with their content; any other tag
/// outside the list is unwrapped to its text. Only http, https and mailto
/// URLs survive.
pub fn sanitize_fragment(html: &str) -> String {
    let allowed_tags = [
        "b", "strong", "i", "em", "u", "s", "del", "strike", "sub", "sup", "a", "img", "ul",
        "ol", "li", "blockquote", "pre", "code", "p", "div", "span", "h1", "h2", "h3", "h4",
        "h5", "h6", "br",
    ];

    let mut builder = ammonia::Builder::new();
    builder.tags(allowed_tags.iter().copied().collect());

    builder.add_generic_attributes(&["class", "style"]);
    builder.add_tag_attributes("a", &["href"]);
    builder.add_tag_attributes("img", &["src", "alt"]);

    builder
        .link_rel(None)
        .url_schemes(["http", "https", "mailto"].iter().copied().collect())
        .clean(html)
        .to_string()
}

/// Convert a rich-text HTML fragment to BBCode.
///
/// Line breaks become newlines first, then the fragment is sanitized,
/// converted and cleansed.
pub fn convert(html_fragment: &str) -> String {
    let with_newlines = br_to_newline(html_fragment);
    let sanitized = sanitize_fragment(&with_newlines);
    let bb = bbcode::html_to_bbcode(&sanitized);
    cleanse(&bb)
}

/// Convert an HTML fragment to plain text.
///
/// Treats `<br>` as a newline and puts paragraphs, headings, list items
/// and quotes on their own lines, then drops all markup and cleanses the
/// result.
pub fn html_to_text(html: &str) -> String {
    let with_newlines = br_to_newline(html);
    let sanitized = sanitize_fragment(&with_newlines);
    cleanse(&bbcode::html_to_plain(&sanitized))
}

/// Render the about block in the requested format.
pub fn render_about(html: &str, format: AboutFormat) -> String {
    match format {
        AboutFormat::BbCode => convert(html),
        AboutFormat::Html => sanitize_fragment(html).trim().to_string(),
        AboutFormat::Text => html_to_text(html),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_br_becomes_newline() {
        let out = convert("Hello<br>World");
        assert_eq!(out, "Hello\nWorld");
        assert!(!out.to_lowercase().contains("<br"));
    }

    #[test]
    fn test_convert_br_variants() {
        assert_eq!(convert("a<br/>b<BR />c<br>\nd"), "a\nb\nc\nd");
    }

    #[test]
    fn test_convert_rich_fragment() {
        let html = r#"
            <span style="font-size: 150%;"><b>Welcome!</b></span><br />
            I like <i>anime</i> &amp; <a href="https://example.test/list">lists</a>.<br />
            <br />
            <img src="https://example.test/banner.png">
        "#;
        assert_eq!(
            convert(html),
            "[size=150][b]Welcome![/b][/size]\nI like [i]anime[/i] & [url=https://example.test/list]lists[/url].\n\n[img]https://example.test/banner.png[/img]"
        );
    }

    #[test]
    fn test_convert_drops_scripts_and_unsafe_links() {
        let html = r#"hi<script>alert(1)</script> <a href="javascript:alert(1)">x</a><style>b{}</style>"#;
        assert_eq!(convert(html), "hi x");
    }

    #[test]
    fn test_convert_spoiler_block() {
        let html = r#"<div class="spoiler"><input type="button" class="button show_button" value="Show spoiler"><span class="spoiler_content" style="display:none"><input type="button" value="Hide spoiler"><br>secret</span></div>"#;
        assert_eq!(convert(html), "[spoiler]\nsecret[/spoiler]");
    }

    #[test]
    fn test_convert_is_total_on_malformed_input() {
        let inputs = [
            "",
            "<",
            "<<<>>>",
            "<b><i>unclosed",
            "</div></div>text",
            "<a href=\"",
            "<br",
            "&notanentity; &#xZZ;",
            "\u{0}\u{1}\u{7f}",
            "<table><tr><td>cell</td></tr></table>",
        ];
        for input in inputs {
            let _ = convert(input);
            let _ = html_to_text(input);
        }

        let depth = 20_000;
        let nested = format!("{}deep{}", "<div><span>".repeat(depth), "</span></div>".repeat(depth));
        assert_eq!(convert(&nested), "deep");
        assert_eq!(html_to_text(&nested), "deep");
        assert_eq!(convert("<b><i>unclosed"), "[b][i]unclosed[/i][/b]");
        assert_eq!(convert("<table><tr><td>cell</td></tr></table>"), "cell");
    }

    #[test]
    fn test_convert_output_is_already_cleansed() {
        let out = convert("  a   <br><br><br><br>   b  ");
        assert_eq!(out, "a\n\nb");
        assert_eq!(cleanse(&out), out);
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(html_to_text("<b>Hello</b><br>my <i>world</i>"), "Hello\nmy world");
    }

    #[test]
    fn test_html_to_text_separates_blocks() {
        assert_eq!(
            html_to_text("<p>first</p><p>second</p><ul><li>one</li><li>two</li></ul>"),
            "first\nsecond\none\ntwo"
        );
        assert_eq!(
            html_to_text("<div>intro</div><blockquote>quoted</blockquote><h2>End</h2>"),
            "intro\nquoted\nEnd"
        );
    }

    #[test]
    fn test_render_about_formats() {
        let html = "<b>Hi</b><br>there<script>x</script>";
        assert_eq!(render_about(html, AboutFormat::BbCode), "[b]Hi[/b]\nthere");
        assert_eq!(render_about(html, AboutFormat::Text), "Hi\nthere");
        let sanitized = render_about(html, AboutFormat::Html);
        assert!(sanitized.contains("<b>Hi</b>"));
        assert!(!sanitized.contains("script"));
    }
}
