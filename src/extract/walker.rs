//! Depth-first walk over a parsed document

use super::rules::{is_inline_styling, is_suppressed, FormatRule, WalkState};
use ego_tree::NodeRef;
use scraper::Node;

/// Accumulates extracted text while visiting nodes in document order
#[derive(Debug, Default)]
pub(crate) struct Walker {
    out: String,
    state: WalkState,
}

impl Walker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Visits `node` and, unless it is suppressed, all of its descendants
    pub(crate) fn visit(&mut self, node: NodeRef<'_, Node>) {
        match node.value() {
            Node::Comment(_) => return,
            Node::Element(element) if is_suppressed(element.name()) => return,
            Node::Text(text) => self.visit_text(node, &text.text),
            _ => {}
        }

        for child in node.children() {
            self.visit(child);
        }
    }

    fn visit_text(&mut self, node: NodeRef<'_, Node>, raw: &str) {
        let parent = node.parent();
        let parent_tag = parent.and_then(element_name);

        // Text directly inside inline styling keeps its leading whitespace so
        // it stays attached to whatever inline run precedes it.
        let text = match parent_tag {
            Some(tag) if is_inline_styling(tag) => raw.trim_end(),
            _ => raw.trim(),
        };
        if text.is_empty() {
            return;
        }

        let rule = parent_tag.map_or(FormatRule::Default, FormatRule::for_tag);
        let closes_nav = rule == FormatRule::Anchor && parent.is_some_and(closes_nav_block);
        self.state = rule.emit(text, self.state, closes_nav, &mut self.out);
    }

    /// Consumes the walker and returns the normalized text
    pub(crate) fn finish(self) -> String {
        finalize(self.out)
    }
}

fn element_name<'a>(node: NodeRef<'a, Node>) -> Option<&'a str> {
    node.value().as_element().map(|element| element.name())
}

/// True when `anchor` is the last child of a `nav` element
fn closes_nav_block(anchor: NodeRef<'_, Node>) -> bool {
    let in_nav = anchor.parent().and_then(element_name) == Some("nav");
    in_nav && anchor.next_sibling().is_none()
}

/// Collapses doubled blank lines and pins the result to two trailing newlines
pub(crate) fn finalize(raw: String) -> String {
    let collapsed = raw.replace("\n\n\n", "\n\n");
    let mut content = collapsed.trim().to_string();

    if !content.is_empty() && !content.ends_with("\n\n") {
        if content.ends_with('\n') {
            content.push('\n');
        } else {
            content.push_str("\n\n");
        }
    }

    content
}
