// Day group detection
// Scans a calendar for weekday groups and their visible event cards

use std::collections::HashMap;

use crate::dom::{classes, CalendarDom, NodeId};
use crate::models::day_group::{day_slug_from_class, DayGroup};

/// Find every day group under `root` that has at least one visible card.
///
/// Groups are returned in order of first appearance. Containers sharing a
/// weekday slug are merged into one group.
pub fn detect_day_groups<D: CalendarDom + ?Sized>(dom: &D, root: NodeId) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for container in dom.query_all(root, classes::DATE_GROUP) {
        let class_list = dom.classes(container);
        let Some(slug) = class_list.iter().find_map(|class| day_slug_from_class(class)) else {
            log::debug!("Date group {:?} has no dm-day-<slug> class, skipping", container);
            continue;
        };

        let index = *index_by_key.entry(slug.to_string()).or_insert_with(|| {
            groups.push(DayGroup::new(slug));
            groups.len() - 1
        });
        let group = &mut groups[index];

        let visible: Vec<NodeId> = dom
            .query_all(container, classes::EVENT_ITEM)
            .into_iter()
            .filter(|event| !dom.has_class(*event, classes::HIDDEN))
            .collect();

        group.containers.push(container);
        if !visible.is_empty() {
            if let Some(badge) = dom.query(container, classes::DAY_BADGE) {
                group.badges.push(badge);
                group.badge.get_or_insert(badge);
            }
        }
        group.events.extend(visible);
    }

    groups.retain(|group| !group.is_empty());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{ElementSpec, MemoryDocument};
    use std::collections::BTreeMap;

    fn event(hidden: bool) -> ElementSpec {
        let spec = ElementSpec::div().class("dm-event-item");
        if hidden {
            spec.class("hidden")
        } else {
            spec
        }
    }

    fn group(day: &str, events: Vec<ElementSpec>) -> ElementSpec {
        ElementSpec::div()
            .class("dm-date-group")
            .class(format!("dm-day-{}", day))
            .child(ElementSpec::div().class("dm-day-badge").text(day))
            .children(events)
    }

    #[test]
    fn test_detects_groups_with_visible_events() {
        let root = ElementSpec::div()
            .class("datamachine-events-calendar")
            .child(group("friday", vec![event(false), event(true), event(false)]))
            .child(group("saturday", vec![event(false)]));
        let (doc, root) = MemoryDocument::from_spec(&BTreeMap::new(), &root);

        let groups = detect_day_groups(&doc, root);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "friday");
        assert_eq!(groups[0].events.len(), 2);
        assert!(groups[0].badge.is_some());
        assert_eq!(groups[1].color, "var(--dm-day-saturday)");
    }

    #[test]
    fn test_skips_groups_with_only_hidden_events() {
        let root = ElementSpec::div()
            .child(group("sunday", vec![event(true), event(true)]))
            .child(ElementSpec::div().class("dm-date-group").child(event(false)));
        let (doc, root) = MemoryDocument::from_spec(&BTreeMap::new(), &root);

        assert!(detect_day_groups(&doc, root).is_empty());
    }

    #[test]
    fn test_same_weekday_from_two_weeks_is_merged() {
        let root = ElementSpec::div()
            .child(group("saturday", vec![event(false)]))
            .child(group("sunday", vec![event(false)]))
            .child(group("saturday", vec![event(false), event(false)]));
        let (doc, root) = MemoryDocument::from_spec(&BTreeMap::new(), &root);

        let groups = detect_day_groups(&doc, root);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "saturday");
        assert_eq!(groups[0].containers.len(), 2);
        assert_eq!(groups[0].events.len(), 3);
        assert_eq!(groups[0].badges.len(), 2);
        assert_eq!(groups[0].badge, Some(groups[0].badges[0]));
    }

    #[test]
    fn test_badge_comes_from_a_container_with_visible_events() {
        let root = ElementSpec::div()
            .child(group("friday", vec![event(true)]))
            .child(group("friday", vec![event(false)]));
        let (doc, root) = MemoryDocument::from_spec(&BTreeMap::new(), &root);

        let groups = detect_day_groups(&doc, root);
        let badges = doc.query_all(root, "dm-day-badge");
        assert_eq!(groups[0].badges, vec![badges[1]]);
        assert_eq!(groups[0].badge, Some(badges[1]));
    }
}
