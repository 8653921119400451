// Client-side filtering
// Toggles card visibility in place, without a server round-trip

use crate::dom::{attributes, classes, CalendarDom, NodeId};
use crate::models::filter::{DateRange, FilterState};
use crate::utils::date::iso_date_part;

/// Criteria a card must meet to stay visible.
#[derive(Debug, Clone, Copy)]
pub struct ClientCriteria<'a> {
    pub filters: &'a FilterState,
    pub search: &'a str,
    pub date_range: &'a DateRange,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientFilterOutcome {
    pub visible_events: usize,
    pub hidden_events: usize,
    pub hidden_groups: usize,
}

impl ClientCriteria<'_> {
    pub fn admits<D: CalendarDom + ?Sized>(&self, dom: &D, card: NodeId) -> bool {
        self.matches_taxonomies(dom, card) && self.matches_search(dom, card) && self.matches_dates(dom, card)
    }

    fn matches_taxonomies<D: CalendarDom + ?Sized>(&self, dom: &D, card: NodeId) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let badges: Vec<(String, String)> = dom
            .query_all(card, classes::TAXONOMY_BADGE)
            .into_iter()
            .filter_map(|badge| {
                Some((
                    dom.attribute(badge, attributes::TAXONOMY)?,
                    dom.attribute(badge, attributes::TERM)?,
                ))
            })
            .collect();
        self.filters
            .matches(badges.iter().map(|(taxonomy, term)| (taxonomy.as_str(), term.as_str())))
    }

    fn matches_search<D: CalendarDom + ?Sized>(&self, dom: &D, card: NodeId) -> bool {
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }
        dom.text_content(card)
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Cards without a readable date only pass an unbounded range.
    fn matches_dates<D: CalendarDom + ?Sized>(&self, dom: &D, card: NodeId) -> bool {
        if self.date_range.is_unbounded() {
            return true;
        }
        dom.attribute(card, attributes::DATE)
            .and_then(|value| iso_date_part(&value))
            .is_some_and(|date| self.date_range.contains(date))
    }
}

/// Show or hide every card under `root`, then hide date groups left empty.
pub fn apply_client_filters<D: CalendarDom + ?Sized>(
    dom: &mut D,
    root: NodeId,
    criteria: &ClientCriteria<'_>,
) -> ClientFilterOutcome {
    let mut outcome = ClientFilterOutcome::default();

    for card in dom.query_all(root, classes::EVENT_ITEM) {
        let visible = criteria.admits(&*dom, card);
        dom.set_class(card, classes::HIDDEN, !visible);
        if visible {
            outcome.visible_events += 1;
        } else {
            outcome.hidden_events += 1;
        }
    }

    for group in dom.query_all(root, classes::DATE_GROUP) {
        let empty = dom
            .query_all(group, classes::EVENT_ITEM)
            .into_iter()
            .all(|card| dom.has_class(card, classes::HIDDEN));
        dom.set_class(group, classes::HIDDEN, empty);
        if empty {
            outcome.hidden_groups += 1;
        }
    }

    log::debug!(
        "Client filter: {} visible, {} hidden, {} empty groups",
        outcome.visible_events,
        outcome.hidden_events,
        outcome.hidden_groups
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementSpec, MemoryDocument};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn card(title: &str, date: &str, badges: &[(&str, &str)]) -> ElementSpec {
        ElementSpec::div()
            .class("dm-event-item")
            .attr("data-date", date)
            .text(title)
            .children(badges.iter().map(|(taxonomy, term)| {
                ElementSpec::new("span")
                    .class("dm-taxonomy-badge")
                    .attr("data-taxonomy", *taxonomy)
                    .attr("data-term", *term)
            }))
    }

    fn document() -> (MemoryDocument, NodeId) {
        let root = ElementSpec::div()
            .class("datamachine-events-calendar")
            .child(
                ElementSpec::div()
                    .class("dm-date-group")
                    .class("dm-day-friday")
                    .child(card("Jazz Trio", "2025-06-13T19:00:00", &[("venue", "12"), ("genre", "4")]))
                    .child(card("Rock Show", "2025-06-13T21:00:00", &[("venue", "15"), ("genre", "7")])),
            )
            .child(
                ElementSpec::div()
                    .class("dm-date-group")
                    .class("dm-day-saturday")
                    .child(card("Open Mic", "2025-06-14T18:00:00", &[("venue", "12")])),
            );
        MemoryDocument::from_spec(&BTreeMap::new(), &root)
    }

    fn titles_visible(doc: &MemoryDocument, root: NodeId) -> Vec<String> {
        doc.query_all(root, "dm-event-item")
            .into_iter()
            .filter(|card| !doc.has_class(*card, "hidden"))
            .map(|card| doc.text_content(card))
            .collect()
    }

    #[test]
    fn test_and_across_or_within_taxonomies() {
        let (mut doc, root) = document();
        let mut filters = FilterState::new();
        filters.set_term("venue", "12", true);
        filters.set_term("venue", "15", true);
        filters.set_term("genre", "4", true);
        let range = DateRange::default();
        let criteria = ClientCriteria { filters: &filters, search: "", date_range: &range };

        let outcome = apply_client_filters(&mut doc, root, &criteria);
        // Open Mic has no genre badge, Rock Show has the wrong genre
        assert_eq!(titles_visible(&doc, root), vec!["Jazz Trio".to_string()]);
        assert_eq!(outcome.visible_events, 1);
        assert_eq!(outcome.hidden_groups, 1);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let (mut doc, root) = document();
        let filters = FilterState::new();
        let range = DateRange::default();
        let criteria = ClientCriteria { filters: &filters, search: "  rock ", date_range: &range };

        apply_client_filters(&mut doc, root, &criteria);
        assert_eq!(titles_visible(&doc, root), vec!["Rock Show".to_string()]);
    }

    #[test]
    fn test_date_range_filters_by_day() {
        let (mut doc, root) = document();
        let filters = FilterState::new();
        let range = DateRange::new(NaiveDate::from_ymd_opt(2025, 6, 14), None);
        let criteria = ClientCriteria { filters: &filters, search: "", date_range: &range };

        apply_client_filters(&mut doc, root, &criteria);
        assert_eq!(titles_visible(&doc, root), vec!["Open Mic".to_string()]);
        let friday = doc.query(root, "dm-day-friday").unwrap();
        assert!(doc.has_class(friday, "hidden"));
    }

    #[test]
    fn test_clearing_criteria_restores_everything() {
        let (mut doc, root) = document();
        let mut filters = FilterState::new();
        filters.set_term("venue", "15", true);
        let range = DateRange::default();
        apply_client_filters(&mut doc, root, &ClientCriteria { filters: &filters, search: "", date_range: &range });

        filters.clear();
        let outcome =
            apply_client_filters(&mut doc, root, &ClientCriteria { filters: &filters, search: "", date_range: &range });
        assert_eq!(outcome.visible_events, 3);
        assert_eq!(outcome.hidden_groups, 0);
        let saturday = doc.query(root, "dm-day-saturday").unwrap();
        assert!(!doc.has_class(saturday, "hidden"));
    }
}
