//! Badge renderer: puts each day's name badge on its first event's corner,
//! inside the gap the border renderer leaves in the outline's top edge.

use std::time::Instant;

use crate::dom::{attributes, classes, content_container, CalendarDom, NodeId};
use crate::models::settings::OutlineSettings;
use crate::services::day_groups::detect_day_groups;
use crate::services::grid_metrics::get_active_grid_settings;
use crate::services::schedule::RenderSchedule;
use crate::services::shape::path::fmt_coord;
use crate::utils::date::earliest_iso_index;

/// Where a badge was placed, relative to the content container.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgePlacement {
    pub key: String,
    pub badge: NodeId,
    /// Chronologically first visible event of the group
    pub event: NodeId,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug)]
pub struct BadgeRenderer {
    root: NodeId,
    settings: OutlineSettings,
    schedule: RenderSchedule,
    placements: Vec<BadgePlacement>,
    render_count: u64,
}

impl BadgeRenderer {
    pub fn new<D: CalendarDom + ?Sized>(dom: &mut D, root: NodeId, settings: OutlineSettings) -> Self {
        let mut renderer = Self {
            root,
            schedule: RenderSchedule::new(&settings),
            settings,
            placements: Vec::new(),
            render_count: 0,
        };
        let container = content_container(&*dom, root);
        renderer.schedule.observe(dom, container);
        renderer.render_all_badges(dom);
        renderer
    }

    /// Position the badge of every visible group and hide the badges of
    /// groups whose events are all filtered out.
    pub fn render_all_badges<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) -> usize {
        let container = content_container(&*dom, self.root);
        let origin = dom.bounding_rect(container);
        let grid = get_active_grid_settings(&*dom, container, &self.settings.grid_defaults);
        let groups = detect_day_groups(&*dom, self.root);

        let mut placements = Vec::with_capacity(groups.len());
        for group in &groups {
            let Some(badge) = group.badge else {
                log::debug!("Day group '{}' has no badge element", group.key);
                continue;
            };

            let dates: Vec<Option<String>> = group
                .events
                .iter()
                .map(|event| dom.attribute(*event, attributes::DATE))
                .collect();
            let Some(first) = earliest_iso_index(&dates).map(|index| group.events[index]) else {
                continue;
            };

            let rect = dom.bounding_rect(first).relative_to(&origin);
            placements.push(BadgePlacement {
                key: group.key.clone(),
                badge,
                event: first,
                left: rect.left - self.settings.padding + grid.badge_offset_x,
                top: rect.top - self.settings.padding - self.settings.badge_vertical_inset,
            });
        }

        // A badge stays visible while its own container shows a card
        for badge in dom.query_all(self.root, classes::DAY_BADGE) {
            let shown = groups.iter().any(|group| group.badges.contains(&badge));
            dom.set_class(badge, classes::HIDDEN, !shown);
        }
        for placement in &placements {
            dom.set_style(placement.badge, "position", "absolute");
            dom.set_style(placement.badge, "left", &format!("{}px", fmt_coord(placement.left)));
            dom.set_style(placement.badge, "top", &format!("{}px", fmt_coord(placement.top)));
        }

        self.render_count += 1;
        log::debug!(
            "Positioned {} day badges for calendar {:?}",
            placements.len(),
            self.root
        );
        self.placements = placements;
        self.placements.len()
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.schedule.on_resize(now);
    }

    pub fn refresh(&mut self, now: Instant) {
        self.schedule.request_refresh(now);
    }

    pub fn tick<D: CalendarDom + ?Sized>(&mut self, dom: &mut D, now: Instant) -> bool {
        if !self.schedule.due(now) {
            return false;
        }
        self.render_all_badges(dom);
        true
    }

    pub fn destroy<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) {
        self.schedule.destroy(dom);
        self.placements.clear();
    }

    pub fn placements(&self) -> &[BadgePlacement] {
        &self.placements
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn is_pending(&self) -> bool {
        self.schedule.is_pending()
    }
}
