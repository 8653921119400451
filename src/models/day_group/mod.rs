// Day group model
// A weekday cluster of event cards as found in the rendered calendar

use crate::dom::NodeId;

/// Class prefix that marks a date group with its weekday slug.
pub const DAY_CLASS_PREFIX: &str = "dm-day-";

/// Visible event cards sharing a weekday slug, plus their badge.
///
/// The key is the weekday slug from the `dm-day-<slug>` class, not a date:
/// two visible Saturdays from different weeks land in the same group.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// Weekday slug, e.g. "saturday"
    pub key: String,
    /// Date group containers that contributed cards, in document order
    pub containers: Vec<NodeId>,
    /// Visible event cards in document order
    pub events: Vec<NodeId>,
    /// Badge the renderer positions: the first one found in a container
    /// with visible cards
    pub badge: Option<NodeId>,
    /// Badges of every container with visible cards, in document order
    pub badges: Vec<NodeId>,
    /// CSS colour reference for the outline stroke
    pub color: String,
}

impl DayGroup {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        let color = day_color_var(&key);
        Self {
            key,
            containers: Vec::new(),
            events: Vec::new(),
            badge: None,
            badges: Vec::new(),
            color,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Extract the weekday slug from a `dm-day-<slug>` class name.
pub fn day_slug_from_class(class: &str) -> Option<&str> {
    class
        .strip_prefix(DAY_CLASS_PREFIX)
        .filter(|slug| !slug.is_empty() && slug.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
}

/// `var(--dm-day-<slug>)` colour token for a slug.
pub fn day_color_var(slug: &str) -> String {
    format!("var(--{}{})", DAY_CLASS_PREFIX, slug)
}
