//! Border renderer: detect → classify → synthesize, drawn into the SVG overlay.

use std::time::Instant;

use crate::dom::{attributes, classes, content_container, CalendarDom, NodeId, SvgElement};
use crate::models::geometry::Rect;
use crate::models::settings::OutlineSettings;
use crate::models::shape::{Shape, ShapeCase};
use crate::services::day_groups::detect_day_groups;
use crate::services::grid_metrics::get_active_grid_settings;
use crate::services::schedule::RenderSchedule;
use crate::services::shape::path::fmt_coord;
use crate::services::shape::{outline_for, PlacedCard};

/// Outline computed for one day group in a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutline {
    pub key: String,
    pub color: String,
    pub case: ShapeCase,
    pub shape: Shape,
    pub events: Vec<NodeId>,
}

impl GroupOutline {
    pub fn to_svg(&self) -> SvgElement {
        let element = match &self.shape {
            Shape::Path { path, .. } => SvgElement::path(path.clone()),
            Shape::Rect {
                left,
                top,
                width,
                height,
                border_radius,
            } => SvgElement::new("rect")
                .with_attr("x", fmt_coord(*left))
                .with_attr("y", fmt_coord(*top))
                .with_attr("width", fmt_coord(*width))
                .with_attr("height", fmt_coord(*height))
                .with_attr("rx", fmt_coord(*border_radius))
                .with_attr("ry", fmt_coord(*border_radius)),
        };

        element
            .with_attr("class", format!("dm-day-border dm-day-border-{}", self.key))
            .with_attr(attributes::DAY, self.key.clone())
            .with_attr("data-shape", self.case.as_str())
            .with_attr("fill", "none")
            .with_attr("stroke", self.color.clone())
    }
}

/// Compute every visible group's outline in coordinates relative to `origin`.
///
/// Pure read: rows and columns are inferred against the grid container, the
/// shapes are expressed relative to `origin` (normally the overlay's box).
pub fn compute_outlines<D: CalendarDom + ?Sized>(
    dom: &D,
    root: NodeId,
    origin: &Rect,
    settings: &OutlineSettings,
) -> Vec<GroupOutline> {
    let container = content_container(dom, root);
    let grid = get_active_grid_settings(dom, container, &settings.grid_defaults);
    let grid_origin = dom.bounding_rect(container);

    detect_day_groups(dom, root)
        .into_iter()
        .filter_map(|group| {
            let cards: Vec<PlacedCard> = group
                .events
                .iter()
                .map(|event| {
                    let rect = dom.bounding_rect(*event);
                    PlacedCard::locate(&rect.relative_to(&grid_origin), rect.relative_to(origin), &grid)
                })
                .collect();

            let (case, shape) = outline_for(&cards, &grid, settings, group.badge.is_some())?;
            Some(GroupOutline {
                key: group.key,
                color: group.color,
                case,
                shape,
                events: group.events,
            })
        })
        .collect()
}

/// Owns the border overlay of one calendar.
#[derive(Debug)]
pub struct BorderRenderer {
    root: NodeId,
    settings: OutlineSettings,
    schedule: RenderSchedule,
    outlines: Vec<GroupOutline>,
    render_count: u64,
}

impl BorderRenderer {
    /// Attach to the calendar at `root`, observe its grid for resizes and
    /// render once.
    pub fn new<D: CalendarDom + ?Sized>(dom: &mut D, root: NodeId, settings: OutlineSettings) -> Self {
        let mut renderer = Self {
            root,
            schedule: RenderSchedule::new(&settings),
            settings,
            outlines: Vec::new(),
            render_count: 0,
        };
        let container = content_container(&*dom, root);
        renderer.schedule.observe(dom, container);
        renderer.render_all_borders(dom);
        renderer
    }

    /// Clear the overlay and draw one element per visible day group.
    ///
    /// A missing overlay is logged and skipped; the calendar stays usable.
    pub fn render_all_borders<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) -> usize {
        let Some(overlay) = dom.query(self.root, classes::BORDER_OVERLAY) else {
            log::error!(
                "Border overlay .{} not found in calendar {:?}; borders not drawn",
                classes::BORDER_OVERLAY,
                self.root
            );
            return 0;
        };

        dom.clear_children(overlay);
        let origin = dom.bounding_rect(overlay);
        let outlines = compute_outlines(&*dom, self.root, &origin, &self.settings);
        for outline in &outlines {
            dom.append_svg(overlay, outline.to_svg());
        }

        self.render_count += 1;
        log::debug!(
            "Rendered {} day borders for calendar {:?} (pass {})",
            outlines.len(),
            self.root,
            self.render_count
        );
        self.outlines = outlines;
        self.outlines.len()
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.schedule.on_resize(now);
    }

    /// Schedule a re-render after filtering changed the visible cards.
    pub fn refresh(&mut self, now: Instant) {
        self.schedule.request_refresh(now);
    }

    /// Render if a debounce timer fired. Returns true when a pass ran.
    pub fn tick<D: CalendarDom + ?Sized>(&mut self, dom: &mut D, now: Instant) -> bool {
        if !self.schedule.due(now) {
            return false;
        }
        self.render_all_borders(dom);
        true
    }

    pub fn destroy<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) {
        self.schedule.destroy(dom);
        self.outlines.clear();
    }

    pub fn outlines(&self) -> &[GroupOutline] {
        &self.outlines
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn is_pending(&self) -> bool {
        self.schedule.is_pending()
    }
}
