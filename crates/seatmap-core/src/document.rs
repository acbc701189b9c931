//! In-memory SVG document tree.
//!
//! The venue map is held as a `StableDiGraph` whose edges represent
//! parent→child containment. Element attributes keep their source order so
//! the emitted markup diffs cleanly against the source file. Inline
//! `style` and `class` are exposed through typed helpers; every mutation the
//! viewer performs (fills, hover emphasis, the `selected` class, stamps)
//! goes through them.

use crate::style::InlineStyle;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use smallvec::SmallVec;

/// Id of the group that holds the interactive shapes.
pub const SHAPES_GROUP_ID: &str = "shapes";

// ─── Nodes ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    /// Synthetic document root (the container).
    Root,
    Element(SvgElement),
    Text(String),
}

/// A single element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgElement {
    pub tag: String,
    pub attrs: SmallVec<[(String, String); 6]>,
}

impl SvgElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: SmallVec::new(),
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    /// Element local name without any namespace prefix (`svg:path` → `path`).
    pub fn local_name(&self) -> &str {
        self.tag.rsplit(':').next().unwrap_or(&self.tag)
    }

    /// `data-section` equals `key`, or `data-tags` contains it as a
    /// substring. Tag matching is loose to tolerate hand-authored venue files.
    pub fn matches_section_key(&self, key: &str) -> bool {
        !key.is_empty()
            && (self.attr("data-section") == Some(key)
                || self.attr("data-tags").is_some_and(|tags| tags.contains(key)))
    }

    // ─── class ───────────────────────────────────────────────────────────

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }

    /// Returns true if the class was newly added.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let next = match self.attr("class") {
            Some(c) if !c.trim().is_empty() => format!("{} {class}", c.trim()),
            _ => class.to_string(),
        };
        self.set_attr("class", &next);
        true
    }

    /// Returns true if the class was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let rest: Vec<&str> = self
            .attr("class")
            .unwrap_or_default()
            .split_whitespace()
            .filter(|t| *t != class)
            .collect();
        if rest.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = rest.join(" ");
            self.set_attr("class", &joined);
        }
        true
    }

    // ─── style ───────────────────────────────────────────────────────────

    pub fn style(&self) -> InlineStyle {
        self.attr("style").map(InlineStyle::parse).unwrap_or_default()
    }

    pub fn style_value(&self, prop: &str) -> Option<String> {
        self.style().get(prop).map(str::to_string)
    }

    pub fn set_style(&mut self, prop: &str, value: &str) {
        let mut style = self.style();
        style.set(prop, value);
        self.store_style(style);
    }

    /// Returns true if the property was present.
    pub fn remove_style(&mut self, prop: &str) -> bool {
        let mut style = self.style();
        let removed = style.remove(prop);
        if removed {
            self.store_style(style);
        }
        removed
    }

    fn store_style(&mut self, style: InlineStyle) {
        if style.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", &style.to_string());
        }
    }
}

// ─── Document ────────────────────────────────────────────────────────────

/// The parsed venue map.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    pub graph: StableDiGraph<SvgNode, ()>,
    pub root: NodeIndex,
}

impl Default for SvgDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgDocument {
    #[must_use]
    pub fn new() -> Self {
        let mut graph = StableDiGraph::new();
        let root = graph.add_node(SvgNode::Root);
        Self { graph, root }
    }

    /// Append a node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeIndex, node: SvgNode) -> NodeIndex {
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        idx
    }

    /// Children in document (insertion) order.
    ///
    /// Nodes are only ever appended, so sorting by `NodeIndex` gives source
    /// order regardless of how `petgraph` iterates its adjacency list.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut children: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .collect();
        children.sort();
        children
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Incoming)
            .next()
    }

    pub fn element(&self, idx: NodeIndex) -> Option<&SvgElement> {
        match self.graph.node_weight(idx) {
            Some(SvgNode::Element(el)) => Some(el),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, idx: NodeIndex) -> Option<&mut SvgElement> {
        match self.graph.node_weight_mut(idx) {
            Some(SvgNode::Element(el)) => Some(el),
            _ => None,
        }
    }

    /// All element indices in document (pre-)order.
    pub fn elements(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        self.collect_elements(self.root, &mut out);
        out
    }

    fn collect_elements(&self, idx: NodeIndex, out: &mut Vec<NodeIndex>) {
        if self.element(idx).is_some() {
            out.push(idx);
        }
        for child in self.children(idx) {
            self.collect_elements(child, out);
        }
    }

    /// Elements in document order matching a predicate.
    pub fn select(&self, pred: impl Fn(&SvgElement) -> bool) -> Vec<NodeIndex> {
        self.elements()
            .into_iter()
            .filter(|&idx| self.element(idx).is_some_and(&pred))
            .collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeIndex> {
        self.elements()
            .into_iter()
            .find(|&idx| self.element(idx).and_then(|el| el.attr("id")) == Some(id))
    }

    /// Whether `ancestor` is a strict ancestor of `idx`.
    pub fn is_ancestor_of(&self, ancestor: NodeIndex, idx: NodeIndex) -> bool {
        let mut current = self.parent(idx);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Shapes that receive pointer listeners: inside `#shapes`, every
    /// `<path>` and every element carrying a `data-section` marker.
    pub fn interactive_shapes(&self) -> Vec<NodeIndex> {
        let Some(group) = self.find_by_id(SHAPES_GROUP_ID) else {
            return Vec::new();
        };
        self.select(|el| el.local_name() == "path" || el.attr("data-section").is_some())
            .into_iter()
            .filter(|&idx| self.is_ancestor_of(group, idx))
            .collect()
    }

    /// Elements whose `data-section` equals `key` or whose `data-tags`
    /// contains `key` as a substring. An empty key matches nothing.
    pub fn shapes_for_key(&self, key: &str) -> Vec<NodeIndex> {
        if key.is_empty() {
            return Vec::new();
        }
        self.select(|el| el.matches_section_key(key))
    }

    /// Elements carrying the given class.
    pub fn with_class(&self, class: &str) -> Vec<NodeIndex> {
        self.select(|el| el.has_class(class))
    }
}
