// ABOUTME: HTML fragment to BBCode conversion by walking scraper's node tree.
// ABOUTME: Unknown elements degrade to their text; conversion never fails.

use ego_tree::iter::Edge;
use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};

/// Value of a CSS property in an inline `style` attribute.
fn style_value<'s>(style: &'s str, prop: &str) -> Option<&'s str> {
    style.split(';').find_map(|decl| {
        let (name, value) = decl.split_once(':')?;
        if name.trim().eq_ignore_ascii_case(prop) {
            Some(value.trim())
        } else {
            None
        }
    })
}

/// Opening/closing tag pairs implied by a span/div/p's class and inline style.
fn style_wrappers(el: &Element) -> Vec<(String, &'static str)> {
    let mut wrappers = Vec::new();

    if el.classes().any(|c| c == "spoiler_content") {
        wrappers.push(("[spoiler]".to_string(), "[/spoiler]"));
    }

    let Some(style) = el.attr("style") else {
        return wrappers;
    };

    match style_value(style, "text-align").map(str::to_ascii_lowercase).as_deref() {
        Some("center") => wrappers.push(("[center]".to_string(), "[/center]")),
        Some("right") => wrappers.push(("[right]".to_string(), "[/right]")),
        _ => {}
    }
    if let Some(pct) = style_value(style, "font-size").and_then(|v| v.strip_suffix('%')) {
        let pct = pct.trim();
        if !pct.is_empty() && pct.chars().all(|c| c.is_ascii_digit()) {
            wrappers.push((format!("[size={}]", pct), "[/size]"));
        }
    }
    if let Some(color) = style_value(style, "color").filter(|c| !c.is_empty()) {
        wrappers.push((format!("[color={}]", color), "[/color]"));
    }

    wrappers
}

/// What to emit when an element's subtree has been written.
#[derive(Default)]
struct Close {
    tag: String,
    block: bool,
    pre: bool,
}

impl Close {
    fn tag(tag: impl Into<String>) -> Self {
        Close {
            tag: tag.into(),
            ..Close::default()
        }
    }
}

/// Serializes a node tree. The walk is iterative; closing tags wait on
/// `closes` until their element's `Edge::Close`.
#[derive(Default)]
struct BbWriter {
    out: String,
    pre_depth: usize,
    plain: bool,
    closes: Vec<Close>,
}

impl BbWriter {
    fn plain() -> Self {
        BbWriter {
            plain: true,
            ..BbWriter::default()
        }
    }

    fn write(&mut self, root: NodeRef<'_, Node>) {
        for edge in root.traverse() {
            match edge {
                Edge::Open(node) => {
                    let close = match node.value() {
                        Node::Text(text) => {
                            self.text(node, text);
                            Close::default()
                        }
                        Node::Element(el) => self.open(el),
                        _ => Close::default(),
                    };
                    self.closes.push(close);
                }
                Edge::Close(_) => {
                    if let Some(close) = self.closes.pop() {
                        self.close(close);
                    }
                }
            }
        }
    }

    fn text(&mut self, node: NodeRef<'_, Node>, text: &str) {
        if self.pre_depth > 0 {
            self.out.push_str(text);
            return;
        }

        // indentation between list items
        if text.trim().is_empty() {
            let in_list = node
                .parent()
                .and_then(|p| p.value().as_element())
                .map_or(false, |p| matches!(p.name(), "ul" | "ol"));
            if in_list {
                return;
            }
        }

        for c in text.chars() {
            if c != '\n' && c.is_whitespace() {
                if !(self.out.is_empty() || self.out.ends_with(' ') || self.out.ends_with('\n')) {
                    self.out.push(' ');
                }
            } else {
                self.out.push(c);
            }
        }
    }

    fn block_break(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    /// Opening markup, unless writing plain text.
    fn markup(&mut self, open: &str) {
        if !self.plain {
            self.out.push_str(open);
        }
    }

    fn wrap(&mut self, open: &str, close: &str) -> Close {
        self.markup(open);
        Close::tag(close)
    }

    /// Start a block element; `close` is written before the trailing break.
    fn block(&mut self, open: impl FnOnce(&mut Self) -> Close) -> Close {
        self.block_break();
        Close {
            block: true,
            ..open(self)
        }
    }

    fn styled(&mut self, el: &Element) -> Close {
        let wrappers = style_wrappers(el);
        for (open, _) in &wrappers {
            self.markup(open);
        }
        Close::tag(wrappers.iter().rev().map(|(_, close)| *close).collect::<String>())
    }

    fn open(&mut self, el: &Element) -> Close {
        match el.name() {
            "b" | "strong" => self.wrap("[b]", "[/b]"),
            "i" | "em" => self.wrap("[i]", "[/i]"),
            "u" => self.wrap("[u]", "[/u]"),
            "s" | "del" | "strike" => self.wrap("[s]", "[/s]"),
            "sub" => self.wrap("[sub]", "[/sub]"),
            "sup" => self.wrap("[sup]", "[/sup]"),
            "a" => match el.attr("href").map(str::trim).filter(|h| !h.is_empty()) {
                Some(href) => self.wrap(&format!("[url={}]", href), "[/url]"),
                None => Close::default(),
            },
            "img" => {
                if let Some(src) = el.attr("src").map(str::trim).filter(|s| !s.is_empty()) {
                    self.markup(&format!("[img]{}[/img]", src));
                }
                Close::default()
            }
            "br" => {
                self.out.push('\n');
                Close::default()
            }
            "ul" | "ol" if self.plain => self.block(|_| Close::default()),
            "ul" => self.wrap("[list]", "[/list]"),
            "ol" => self.wrap("[list=1]", "[/list]"),
            "li" if self.plain => self.block(|_| Close::default()),
            "li" => self.wrap("[*]", ""),
            "blockquote" if self.plain => self.block(|_| Close::default()),
            "blockquote" => self.wrap("[quote]", "[/quote]"),
            "pre" => {
                self.pre_depth += 1;
                let close = self.wrap("[code]", "[/code]");
                Close { pre: true, ..close }
            }
            "code" if self.pre_depth > 0 => Close::default(),
            "code" => self.wrap("[code]", "[/code]"),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => self.block(|w| w.wrap("[b]", "[/b]")),
            "p" | "div" => self.block(|w| w.styled(el)),
            "span" => self.styled(el),
            _ => Close::default(),
        }
    }

    fn close(&mut self, close: Close) {
        if !self.plain {
            self.out.push_str(&close.tag);
        }
        if close.pre {
            self.pre_depth = self.pre_depth.saturating_sub(1);
        }
        if close.block {
            self.block_break();
        }
    }
}

/// Convert an HTML fragment to BBCode.
///
/// Text is taken from the parsed tree, so entities arrive decoded. Literal
/// `\n` characters in text are kept; other whitespace runs collapse to a
/// single space. Elements without a BBCode equivalent contribute only their
/// children.
pub fn html_to_bbcode(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut writer = BbWriter::default();
    writer.write(*fragment.root_element());
    writer.out
}

/// Plain text of an HTML fragment, with paragraphs, headings, list items
/// and quotes on their own lines.
pub fn html_to_plain(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut writer = BbWriter::plain();
    writer.write(*fragment.root_element());
    writer.out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_tags() {
        assert_eq!(
            html_to_bbcode("<b>bold</b> <strong>strong</strong> <i>it</i> <em>em</em> <u>u</u> <s>s</s>"),
            "[b]bold[/b] [b]strong[/b] [i]it[/i] [i]em[/i] [u]u[/u] [s]s[/s]"
        );
    }

    #[test]
    fn test_links_and_images() {
        assert_eq!(
            html_to_bbcode(r#"<a href="https://example.test/x">site</a>"#),
            "[url=https://example.test/x]site[/url]"
        );
        assert_eq!(html_to_bbcode("<a>plain</a>"), "plain");
        assert_eq!(
            html_to_bbcode(r#"<img src="http://x/a.png" alt="a">"#),
            "[img]http://x/a.png[/img]"
        );
        assert_eq!(html_to_bbcode("<img alt=\"no src\">"), "");
    }

    #[test]
    fn test_lists() {
        let html = "<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>";
        assert_eq!(html_to_bbcode(html), "[list][*]one[*]two[/list]");
        assert_eq!(html_to_bbcode("<ol><li>a</li></ol>"), "[list=1][*]a[/list]");
    }

    #[test]
    fn test_styled_spans() {
        assert_eq!(
            html_to_bbcode(r#"<span style="font-size: 150%;">big</span>"#),
            "[size=150]big[/size]"
        );
        assert_eq!(
            html_to_bbcode(r#"<span style="color: #ff0000">red</span>"#),
            "[color=#ff0000]red[/color]"
        );
        assert_eq!(
            html_to_bbcode(r#"<div style="text-align: center;">mid</div>"#),
            "[center]mid[/center]\n"
        );
        assert_eq!(
            html_to_bbcode(r#"<span style="font-size: 12px">px ignored</span>"#),
            "px ignored"
        );
    }

    #[test]
    fn test_spoiler() {
        let html = r#"<div class="spoiler"><span class="spoiler_content" style="display:none">secret</span></div>"#;
        assert_eq!(html_to_bbcode(html), "[spoiler]secret[/spoiler]\n");
    }

    #[test]
    fn test_preformatted_keeps_whitespace() {
        assert_eq!(
            html_to_bbcode("<pre><code>a  b\n  c</code></pre>"),
            "[code]a  b\n  c[/code]"
        );
        assert_eq!(html_to_bbcode("<code>x</code>"), "[code]x[/code]");
    }

    #[test]
    fn test_blocks_break_lines() {
        assert_eq!(html_to_bbcode("<p>a</p><p>b</p>"), "a\nb\n");
        assert_eq!(html_to_bbcode("x<h2>Title</h2>y"), "x\n[b]Title[/b]\ny");
    }

    #[test]
    fn test_entities_decoded_and_whitespace_collapsed() {
        assert_eq!(html_to_bbcode("Tom &amp;   Jerry"), "Tom & Jerry");
        assert_eq!(html_to_bbcode("keep\nnewline"), "keep\nnewline");
    }

    #[test]
    fn test_leftover_br_is_newline() {
        assert_eq!(html_to_bbcode("a<br>b"), "a\nb");
    }

    #[test]
    fn test_unknown_elements_degrade_to_text() {
        assert_eq!(html_to_bbcode("<marquee>old <blink>web</blink></marquee>"), "old web");
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 20_000;
        let html = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));
        assert_eq!(html_to_bbcode(&html), "x");

        let quoted = format!("{}q{}", "<blockquote>".repeat(depth), "</blockquote>".repeat(depth));
        let out = html_to_bbcode(&quoted);
        assert!(out.starts_with("[quote][quote]"));
        assert!(out.ends_with("[/quote][/quote]"));
    }

    #[test]
    fn test_close_tags_follow_their_element() {
        assert_eq!(
            html_to_bbcode("<pre>a <b>b</b></pre> c   d"),
            "[code]a [b]b[/b][/code] c d"
        );
        assert_eq!(
            html_to_bbcode(r#"<div style="color: red; text-align: right">x</div>y"#),
            "[right][color=red]x[/color][/right]\ny"
        );
    }

    #[test]
    fn test_plain_breaks_blocks() {
        assert_eq!(
            html_to_plain("<p>first</p><p>second</p><ul><li>one</li><li>two</li></ul>"),
            "first\nsecond\none\ntwo\n"
        );
        assert_eq!(
            html_to_plain(r#"<b>bold</b> <a href="http://x/">link</a><img src="http://x/i.png"><h3>Head</h3>tail"#),
            "bold link\nHead\ntail"
        );
    }

    #[test]
    fn test_style_value() {
        assert_eq!(style_value("color: red; font-size: 90%", "font-size"), Some("90%"));
        assert_eq!(style_value("COLOR:blue", "color"), Some("blue"));
        assert_eq!(style_value("", "color"), None);
    }
}
