// ABOUTME: Declarative locators and the DocumentQuery capability trait for fail-explicit field access.
// ABOUTME: Required lookups return Result, optional lookups return Option; first match wins.

//! Selector-based field extraction utilities.
//!
//! A [`Locator`] describes where a datum lives: either a plain CSS selector or
//! a label-relative axis ("the `span` following the `span` whose text
//! contains `Joined`"). [`DocumentQuery`] evaluates locators against a
//! [`ParsedDocument`] or a scoped [`Region`].
//!
//! Key behaviors:
//! - When several nodes match, the first in document order wins.
//! - Label text matching is case-sensitive and only looks at the label's own
//!   text nodes, not its descendants.
//! - Text values are whitespace-normalized; attribute values are trimmed.

use std::collections::{HashMap, HashSet};
use std::fmt;

use ego_tree::NodeId;
use scraper::{ElementRef, Selector};

use crate::dom::{ParsedDocument, Region};
use crate::error::{ExtractError, Result};
use crate::extractors::compiled::get_or_compile;
use crate::text::normalize_whitespace;

/// Where to find a node in a profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// Every element matching a CSS selector.
    Css(&'static str),
    /// Elements matching `sibling` that follow, under the same parent, an
    /// element matching `label` whose own text contains `text`.
    FollowingSibling {
        label: &'static str,
        text: &'static str,
        sibling: &'static str,
    },
    /// The parent of an element matching `label` whose own text contains `text`.
    LabelParent {
        label: &'static str,
        text: &'static str,
    },
}

impl Locator {
    /// Shorthand for the common `<label>Text</label><value>..</value>` layout.
    pub const fn following(label: &'static str, text: &'static str, sibling: &'static str) -> Self {
        Locator::FollowingSibling {
            label,
            text,
            sibling,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(css) => write!(f, "{}", css),
            Locator::FollowingSibling {
                label,
                text,
                sibling,
            } => write!(f, "{}:contains({:?}) ~ {}", label, text, sibling),
            Locator::LabelParent { label, text } => {
                write!(f, "{}:contains({:?}) / ..", label, text)
            }
        }
    }
}

/// Concatenated direct text children of an element.
///
/// Every direct text node counts, not just the first: `<span>Member<br>Joined</span>`
/// gives `"MemberJoined"` and so matches a `Joined` label.
pub fn own_text(el: ElementRef<'_>) -> String {
    el.children()
        .filter_map(|child| child.value().as_text())
        .map(|t| &**t)
        .collect()
}

/// Whitespace-normalized text content of an element and its descendants.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&el.text().collect::<String>())
}

fn compile(op: &str, locator: &Locator, css: &str) -> Result<Selector> {
    get_or_compile(css).ok_or_else(|| {
        ExtractError::invalid_selector(
            op,
            locator.to_string(),
            Some(anyhow::anyhow!("cannot compile {:?}", css)),
        )
    })
}

fn push_unique<'a>(out: &mut Vec<ElementRef<'a>>, seen: &mut HashSet<NodeId>, el: ElementRef<'a>) {
    if seen.insert(el.id()) {
        out.push(el);
    }
}

/// Label-relative matches are gathered label by label; a label nested in an
/// earlier label can yield a node that precedes earlier results.
fn sort_document_order(found: &mut [ElementRef<'_>]) {
    if found.len() < 2 {
        return;
    }
    let Some(root) = found[0].ancestors().last() else {
        return;
    };
    let position: HashMap<NodeId, usize> = root
        .descendants()
        .enumerate()
        .map(|(i, node)| (node.id(), i))
        .collect();
    found.sort_by_key(|el| position.get(&el.id()).copied().unwrap_or(usize::MAX));
}

/// Uniform access to document content.
///
/// Implementors only provide raw CSS selection; locator evaluation and the
/// required/optional policies are shared.
pub trait DocumentQuery {
    /// All elements matching a compiled selector, in document order.
    fn select_css<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>>;

    /// All nodes a locator resolves to, in document order.
    fn query_selector<'a>(&'a self, locator: &Locator) -> Result<Vec<ElementRef<'a>>> {
        const OP: &str = "query_selector";
        let mut out = Vec::new();
        let mut seen = HashSet::new();

        match *locator {
            Locator::Css(css) => {
                let sel = compile(OP, locator, css)?;
                out = self.select_css(&sel);
            }
            Locator::FollowingSibling {
                label,
                text,
                sibling,
            } => {
                let label_sel = compile(OP, locator, label)?;
                let sibling_sel = compile(OP, locator, sibling)?;
                for el in self.select_css(&label_sel) {
                    if !own_text(el).contains(text) {
                        continue;
                    }
                    for sib in el.next_siblings().filter_map(ElementRef::wrap) {
                        if sibling_sel.matches(&sib) {
                            push_unique(&mut out, &mut seen, sib);
                        }
                    }
                }
            }
            Locator::LabelParent { label, text } => {
                let label_sel = compile(OP, locator, label)?;
                for el in self.select_css(&label_sel) {
                    if !own_text(el).contains(text) {
                        continue;
                    }
                    if let Some(parent) = el.parent().and_then(ElementRef::wrap) {
                        push_unique(&mut out, &mut seen, parent);
                    }
                }
            }
        }

        if !matches!(locator, Locator::Css(_)) {
            sort_document_order(&mut out);
        }

        tracing::trace!(locator = %locator, matches = out.len(), "evaluated locator");
        Ok(out)
    }

    /// The first node a locator resolves to.
    fn first<'a>(&'a self, locator: &Locator) -> Result<Option<ElementRef<'a>>> {
        Ok(self.query_selector(locator)?.into_iter().next())
    }

    /// Trimmed attribute of the first match.
    ///
    /// Fails with `NotFound` when nothing matches or the first match lacks
    /// the attribute. There is no fallback to later matches.
    fn require_attribute(&self, locator: &Locator, attr: &str) -> Result<String> {
        const OP: &str = "require_attribute";
        let el = self
            .first(locator)?
            .ok_or_else(|| ExtractError::not_found(OP, locator.to_string(), None))?;
        el.value()
            .attr(attr)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| {
                ExtractError::not_found(
                    OP,
                    locator.to_string(),
                    Some(anyhow::anyhow!("attribute {:?} missing", attr)),
                )
            })
    }

    /// Normalized text of the first match; `NotFound` when nothing matches.
    fn require_text(&self, locator: &Locator) -> Result<String> {
        self.first(locator)?
            .map(element_text)
            .ok_or_else(|| ExtractError::not_found("require_text", locator.to_string(), None))
    }

    /// Normalized text of the first match, or `None` when nothing matches.
    fn optional_text(&self, locator: &Locator) -> Option<String> {
        match self.first(locator) {
            Ok(found) => found.map(element_text),
            Err(err) => {
                tracing::warn!(error = %err, "optional locator failed");
                None
            }
        }
    }

    /// Raw inner HTML of the first match, or `None` when nothing matches.
    fn inner_markup(&self, locator: &Locator) -> Option<String> {
        match self.first(locator) {
            Ok(found) => found.map(|el| el.inner_html()),
            Err(err) => {
                tracing::warn!(error = %err, "markup locator failed");
                None
            }
        }
    }

    /// Narrow queries to the first match of a locator.
    fn scope<'a>(&'a self, locator: &Locator) -> Option<Region<'a>> {
        match self.first(locator) {
            Ok(found) => found.map(Region::new),
            Err(err) => {
                tracing::warn!(error = %err, "scope locator failed");
                None
            }
        }
    }
}

impl DocumentQuery for ParsedDocument {
    fn select_css<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        self.html().select(selector).collect()
    }
}

impl DocumentQuery for Region<'_> {
    fn select_css<'a>(&'a self, selector: &Selector) -> Vec<ElementRef<'a>> {
        let element: ElementRef<'a> = self.element();
        element.select(selector).collect()
    }
}
