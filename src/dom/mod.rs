//! Adapter over the live calendar document.
//!
//! Layout truth lives in the host's layout engine, so every render pass
//! re-reads bounding boxes through [`CalendarDom`] instead of keeping a model
//! of its own. The browser host implements the trait over the real DOM;
//! [`memory::MemoryDocument`] implements it over a synthetic tree for tests,
//! benches and recorded layout snapshots.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::models::geometry::Rect;

pub use memory::{ElementSpec, MemoryDocument};

/// Handle to an element of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Handle to a registered resize observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub u64);

/// Class names of the markup contract with the calendar server templates.
pub mod classes {
    pub const CALENDAR_ROOT: &str = "datamachine-events-calendar";
    pub const VENUE_MAP_ROOT: &str = "dm-venue-map";
    pub const CONTENT: &str = "datamachine-events-content";
    pub const DATE_GROUP: &str = "dm-date-group";
    pub const EVENT_ITEM: &str = "dm-event-item";
    pub const TAXONOMY_BADGE: &str = "dm-taxonomy-badge";
    pub const DAY_BADGE: &str = "dm-day-badge";
    pub const BORDER_OVERLAY: &str = "dm-border-overlay";
    pub const PAGINATION: &str = "datamachine-events-pagination";
    pub const RESULTS_COUNTER: &str = "datamachine-events-results-counter";
    pub const PAST_NAVIGATION: &str = "datamachine-events-past-navigation";
    pub const LOADING: &str = "dm-loading";
    pub const ERROR: &str = "datamachine-events-error";
    pub const HIDDEN: &str = "hidden";
}

/// Data attributes read from event cards and taxonomy badges.
pub mod attributes {
    pub const DATE: &str = "data-date";
    pub const TAXONOMY: &str = "data-taxonomy";
    pub const TERM: &str = "data-term";
    pub const DAY: &str = "data-day";
}

/// The grid container of a calendar: its content element, or the root itself
/// when the markup has no separate content wrapper.
pub fn content_container<D: CalendarDom + ?Sized>(dom: &D, root: NodeId) -> NodeId {
    dom.query(root, classes::CONTENT).unwrap_or(root)
}

/// Calendar roots under `scope`, in document order.
pub fn find_calendar_roots<D: CalendarDom + ?Sized>(dom: &D, scope: NodeId) -> Vec<NodeId> {
    let mut roots = dom.query_all(scope, classes::CALENDAR_ROOT);
    roots.extend(dom.query_all(scope, classes::VENUE_MAP_ROOT));
    roots.sort();
    roots.dedup();
    roots
}

/// Read/write access to the calendar document the engine renders into.
pub trait CalendarDom {
    /// Descendants of `scope` carrying `class`, in document order.
    fn query_all(&self, scope: NodeId, class: &str) -> Vec<NodeId>;

    fn query(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.query_all(scope, class).into_iter().next()
    }

    fn classes(&self, node: NodeId) -> Vec<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn text_content(&self, node: NodeId) -> String;

    /// Border box in viewport coordinates.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Computed value of a custom property on `:root`.
    fn root_css_variable(&self, name: &str) -> Option<String>;

    fn set_class(&mut self, node: NodeId, class: &str, enabled: bool);

    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn clear_children(&mut self, node: NodeId);

    fn append_svg(&mut self, parent: NodeId, element: SvgElement);

    /// Replace the children of `node` with parsed `html`.
    fn set_inner_html(&mut self, node: NodeId, html: &str) -> anyhow::Result<()>;

    /// Start watching `node` for size changes. The returned id only scopes
    /// the registration and is handed back to `disconnect_observer`.
    ///
    /// Resize callbacks never flow through this trait. The host turns each
    /// size change of an observed node into a call to
    /// `CalendarSurface::on_resize` (or a renderer's own `on_resize`) and
    /// then keeps calling `tick` so the debounced render runs.
    fn observe_resize(&mut self, node: NodeId) -> ObserverId;

    fn disconnect_observer(&mut self, observer: ObserverId);
}

/// An SVG child element appended to the border overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

impl SvgElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::new("path").with_attr("d", d)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn to_markup(&self) -> String {
        let mut markup = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            markup.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
        }
        markup.push_str("/>");
        markup
    }
}

/// Escape text for inclusion in markup.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}
