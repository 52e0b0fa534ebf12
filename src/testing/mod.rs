//! In-memory page for driving the coordinator in native tests.
//!
//! Layout is deliberately simple: direct children of the root are blocks
//! stacked top to bottom, each as tall as its `height` unless its class list
//! contains `hidden`. Nested nodes sit at the top of their block.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::{Dom, Offset};
use crate::error::TagsError;
use crate::explanation::Explanation;
use crate::model::Visibility;

pub(crate) type NodeId = usize;

pub(crate) const VIEWPORT_HEIGHT: f64 = 100.0;

#[derive(Debug, Default)]
struct FakeNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    class: String,
    text: String,
    id: Option<String>,
    height: f64,
}

#[derive(Debug, Default)]
struct State {
    nodes: Vec<FakeNode>,
    hash: String,
    scroll: Offset,
}

#[derive(Clone, Debug)]
pub(crate) struct FakeDom {
    state: Rc<RefCell<State>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let state = State {
            nodes: vec![FakeNode::default()],
            ..State::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn append(&self, parent: NodeId, class: &str, text: &str, height: f64) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = state.nodes.len();
        state.nodes.push(FakeNode {
            parent: Some(parent),
            class: class.to_string(),
            text: text.to_string(),
            height,
            ..FakeNode::default()
        });
        state.nodes[parent].children.push(id);
        id
    }

    pub fn set_id(&self, node: NodeId, id: &str) {
        self.state.borrow_mut().nodes[node].id = Some(id.to_string());
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.state.borrow().nodes[node]
            .class
            .split_whitespace()
            .any(|c| c == class)
    }

    /// Class string of every node, in creation order.
    pub fn class_snapshot(&self) -> Vec<String> {
        self.state
            .borrow()
            .nodes
            .iter()
            .map(|n| n.class.clone())
            .collect()
    }

    fn descendants(state: &State, scope: NodeId, out: &mut Vec<NodeId>) {
        for &child in &state.nodes[scope].children {
            out.push(child);
            Self::descendants(state, child, out);
        }
    }

    fn block_of(state: &State, mut node: NodeId) -> NodeId {
        while let Some(parent) = state.nodes[node].parent {
            if parent == 0 {
                break;
            }
            node = parent;
        }
        node
    }

    fn block_height(state: &State, block: NodeId) -> f64 {
        let node = &state.nodes[block];
        if node.class.split_whitespace().any(|c| c == Visibility::Hidden.as_ref()) {
            0.0
        } else {
            node.height
        }
    }

    fn page_top(state: &State, node: NodeId) -> f64 {
        let block = Self::block_of(state, node);
        state.nodes[0]
            .children
            .iter()
            .take_while(|&&b| b != block)
            .map(|&b| Self::block_height(state, b))
            .sum()
    }

    fn document_height(state: &State) -> f64 {
        state.nodes[0]
            .children
            .iter()
            .map(|&b| Self::block_height(state, b))
            .sum()
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn elements_by_class(&self, scope: Option<&NodeId>, class: &str) -> Vec<NodeId> {
        let state = self.state.borrow();
        let mut all = Vec::new();
        Self::descendants(&state, scope.copied().unwrap_or(0), &mut all);
        all.retain(|&n| state.nodes[n].class.split_whitespace().any(|c| c == class));
        all
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
    }

    fn class_name(&self, node: &NodeId) -> String {
        self.state.borrow().nodes[*node].class.clone()
    }

    fn set_class_name(&self, node: &NodeId, class: &str) {
        self.state.borrow_mut().nodes[*node].class = class.to_string();
    }

    fn text_content(&self, node: &NodeId) -> String {
        let state = self.state.borrow();
        let mut text = state.nodes[*node].text.clone();
        let mut below = Vec::new();
        Self::descendants(&state, *node, &mut below);
        for n in below {
            text.push_str(&state.nodes[n].text);
        }
        text
    }

    fn render_explanation(
        &self,
        node: &NodeId,
        explanation: &Explanation,
    ) -> Result<(), TagsError> {
        let mut state = self.state.borrow_mut();
        let target = &mut state.nodes[*node];
        target.class = explanation.class_name().to_string();
        target.text = explanation.plain_text();
        Ok(())
    }

    fn location_hash(&self) -> String {
        self.state.borrow().hash.clone()
    }

    fn set_location_hash(&self, fragment: &str) -> Result<(), TagsError> {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        self.state.borrow_mut().hash = if fragment.is_empty() {
            String::new()
        } else {
            format!("#{}", fragment)
        };
        Ok(())
    }

    fn screen_position(&self, node: &NodeId) -> Offset {
        let state = self.state.borrow();
        Offset::new(0.0, Self::page_top(&state, *node)) - state.scroll
    }

    fn scroll_offset(&self) -> Offset {
        self.state.borrow().scroll
    }

    fn scroll_to(&self, offset: Offset) {
        let mut state = self.state.borrow_mut();
        let max_top = (Self::document_height(&state) - VIEWPORT_HEIGHT).max(0.0);
        state.scroll = Offset::new(offset.left.max(0.0), offset.top.clamp(0.0, max_top));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_lookup_matches_tokens_in_document_order() {
        let dom = FakeDom::new();
        let a = dom.append(dom.root(), "entry", "", 10.0);
        let inner = dom.append(a, "tags", "", 0.0);
        let t1 = dom.append(inner, "tag", "x", 0.0);
        let b = dom.append(dom.root(), "entry hidden", "", 10.0);
        let t2 = dom.append(b, "tag", "y", 0.0);
        dom.append(dom.root(), "entry-like", "", 10.0);

        assert_eq!(dom.elements_by_class(None, "entry"), vec![a, b]);
        assert_eq!(dom.elements_by_class(None, "tag"), vec![t1, t2]);
        assert_eq!(dom.elements_by_class(Some(&a), "tag"), vec![t1]);
        assert!(dom.elements_by_class(Some(&t1), "tag").is_empty());
    }

    #[test]
    fn test_hidden_blocks_collapse() {
        let dom = FakeDom::new();
        let a = dom.append(dom.root(), "entry", "", 50.0);
        let b = dom.append(dom.root(), "entry", "", 50.0);
        let label = dom.append(b, "tag", "x", 0.0);

        assert_eq!(dom.screen_position(&label), Offset::new(0.0, 50.0));
        dom.set_class_name(&a, "entry hidden");
        assert_eq!(dom.screen_position(&label), Offset::new(0.0, 0.0));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let dom = FakeDom::new();
        for _ in 0..3 {
            dom.append(dom.root(), "entry", "", 100.0);
        }
        dom.scroll_to(Offset::new(0.0, 1000.0));
        assert_eq!(dom.scroll_offset(), Offset::new(0.0, 200.0));
        dom.scroll_to(Offset::new(-5.0, -40.0));
        assert_eq!(dom.scroll_offset(), Offset::new(0.0, 0.0));
    }

    #[test]
    fn test_hash_round_trip_keeps_browser_shape() {
        let dom = FakeDom::new();
        assert_eq!(dom.location_hash(), "");
        dom.set_location_hash("x").expect("fake hash write");
        assert_eq!(dom.location_hash(), "#x");
        dom.set_location_hash("").expect("fake hash write");
        assert_eq!(dom.location_hash(), "");
    }
}
