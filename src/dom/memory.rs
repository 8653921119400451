// Headless calendar document
//
// An arena-backed element tree with explicit bounding boxes. It stands in for
// the browser DOM in tests, benches and when replaying recorded layouts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{CalendarDom, NodeId, ObserverId, SvgElement};
use crate::models::geometry::Rect;

/// Turns server markup into element specs, standing in for the HTML parser
/// and layout engine of a real host.
pub type MarkupLoader = Box<dyn FnMut(&str) -> anyhow::Result<Vec<ElementSpec>>>;

/// Declarative description of an element subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSpec {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: String,
    pub rect: Rect,
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    rect: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    svg: Option<SvgElement>,
    inner_html: Option<String>,
}

/// In-memory [`CalendarDom`] implementation.
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    css_variables: BTreeMap<String, String>,
    observers: BTreeMap<ObserverId, NodeId>,
    next_observer: u64,
    markup_loader: Option<MarkupLoader>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode {
                tag: "body".to_string(),
                ..MemoryNode::default()
            }],
            css_variables: BTreeMap::new(),
            observers: BTreeMap::new(),
            next_observer: 1,
            markup_loader: None,
        }
    }

    /// Build a document holding `root` under the body, with `:root` variables.
    pub fn from_spec(css_variables: &BTreeMap<String, String>, root: &ElementSpec) -> (Self, NodeId) {
        let mut document = Self::new();
        for (name, value) in css_variables {
            document.set_root_css_variable(name, value);
        }
        let body = document.body();
        let root = document.append(body, root);
        (document, root)
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    pub fn set_root_css_variable(&mut self, name: &str, value: &str) {
        self.css_variables.insert(name.to_string(), value.to_string());
    }

    pub fn set_markup_loader<F>(&mut self, loader: F)
    where
        F: FnMut(&str) -> anyhow::Result<Vec<ElementSpec>> + 'static,
    {
        self.markup_loader = Some(Box::new(loader));
    }

    /// Append a subtree under `parent`, returning the id of its root.
    pub fn append(&mut self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            tag: if spec.tag.is_empty() { "div".to_string() } else { spec.tag.clone() },
            classes: spec.classes.clone(),
            attributes: spec.attributes.clone(),
            text: spec.text.clone(),
            rect: spec.rect,
            parent: Some(parent),
            ..MemoryNode::default()
        });
        self.nodes[parent.0].children.push(id);
        for child in &spec.children {
            self.append(id, child);
        }
        id
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.rect = rect;
        }
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|entry| entry.styles.get(property))
            .map(String::as_str)
    }

    /// Markup last assigned through `set_inner_html`.
    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|entry| entry.inner_html.as_deref())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn svg_children(&self, node: NodeId) -> Vec<&SvgElement> {
        self.children(node)
            .iter()
            .filter_map(|child| self.nodes[child.0].svg.as_ref())
            .collect()
    }

    /// Serialized SVG children of an overlay node.
    pub fn svg_markup(&self, node: NodeId) -> String {
        self.svg_children(node)
            .iter()
            .map(|element| element.to_markup())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn active_observers(&self) -> usize {
        self.observers.len()
    }

    fn detach_children(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    fn collect_descendants(&self, node: NodeId, class: &str, found: &mut Vec<NodeId>) {
        for child in &self.nodes[node.0].children {
            if self.nodes[child.0].classes.iter().any(|c| c == class) {
                found.push(*child);
            }
            self.collect_descendants(*child, class, found);
        }
    }

    fn collect_text(&self, node: NodeId, parts: &mut Vec<String>) {
        let entry = &self.nodes[node.0];
        if !entry.text.is_empty() {
            parts.push(entry.text.clone());
        }
        for child in &entry.children {
            self.collect_text(*child, parts);
        }
    }
}

impl CalendarDom for MemoryDocument {
    fn query_all(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        if scope.0 < self.nodes.len() {
            self.collect_descendants(scope, class, &mut found);
        }
        found
    }

    fn classes(&self, node: NodeId) -> Vec<String> {
        self.nodes
            .get(node.0)
            .map(|entry| entry.classes.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .is_some_and(|entry| entry.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes
            .get(node.0)
            .and_then(|entry| entry.attributes.get(name).cloned())
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut parts = Vec::new();
        if node.0 < self.nodes.len() {
            self.collect_text(node, &mut parts);
        }
        parts.join(" ")
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.nodes
            .get(node.0)
            .map(|entry| entry.rect)
            .unwrap_or_default()
    }

    fn root_css_variable(&self, name: &str) -> Option<String> {
        self.css_variables.get(name).cloned()
    }

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool) {
        let Some(entry) = self.nodes.get_mut(node.0) else {
            return;
        };
        let present = entry.classes.iter().any(|c| c == class);
        if enabled && !present {
            entry.classes.push(class.to_string());
        } else if !enabled && present {
            entry.classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(entry) = self.nodes.get_mut(node.0) {
            entry.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn clear_children(&mut self, node: NodeId) {
        if node.0 < self.nodes.len() {
            self.detach_children(node);
        }
    }

    fn append_svg(&mut self, parent: NodeId, element: SvgElement) {
        if parent.0 >= self.nodes.len() {
            return;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            tag: element.tag.clone(),
            parent: Some(parent),
            svg: Some(element),
            ..MemoryNode::default()
        });
        self.nodes[parent.0].children.push(id);
    }

    fn set_inner_html(&mut self, node: NodeId, html: &str) -> anyhow::Result<()> {
        if node.0 >= self.nodes.len() {
            anyhow::bail!("Cannot set markup of unknown node {:?}", node);
        }

        let specs = match self.markup_loader.as_mut() {
            Some(loader) => loader(html)?,
            None => Vec::new(),
        };

        self.detach_children(node);
        self.nodes[node.0].inner_html = Some(html.to_string());
        for spec in &specs {
            self.append(node, spec);
        }
        Ok(())
    }

    fn observe_resize(&mut self, node: NodeId) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.insert(id, node);
        id
    }

    fn disconnect_observer(&mut self, observer: ObserverId) {
        self.observers.remove(&observer);
    }
}
