//! Path synthesis for each [`ShapeCase`].
//!
//! Outlines are traced clockwise in screen space (y down) starting at the
//! top-left corner, so the first edge is always the top edge the badge gap is
//! cut into. Convex corners turn clockwise (sweep 1), concave corners turn
//! counter-clockwise (sweep 0).

use std::collections::BTreeMap;

use super::classifier::{rows_spanned, PlacedCard};
use super::path::PathBuilder;
use crate::models::geometry::{Point, Rect};
use crate::models::grid::GridSettings;
use crate::models::settings::OutlineSettings;
use crate::models::shape::{Shape, ShapeCase};

/// Opening in the top edge for the day badge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeGap {
    /// Distance from the top edge's left end to the start of the gap
    pub offset_x: f64,
    pub width: f64,
}

/// Drawing parameters for one group's outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineStyle {
    pub padding: f64,
    pub corner_radius: f64,
    pub badge_gap: Option<BadgeGap>,
    pub connector_overshoot: f64,
}

impl OutlineStyle {
    pub fn new(settings: &OutlineSettings, grid: &GridSettings, has_badge: bool) -> Self {
        Self {
            padding: settings.padding,
            corner_radius: grid.border_radius,
            badge_gap: has_badge.then_some(BadgeGap {
                offset_x: grid.badge_offset_x,
                width: settings.badge_gap_width,
            }),
            connector_overshoot: settings.connector_overshoot,
        }
    }

    /// Badge gap on a top edge starting at `top_edge_left`. Rect cases pass
    /// the bounds' left, a cutout passes its first band's left and a split
    /// its upper rectangle's left, which is where the badge of the group's
    /// first card lands.
    fn gap_from(&self, top_edge_left: f64) -> Option<(f64, f64)> {
        self.badge_gap.map(|gap| {
            let start = top_edge_left + gap.offset_x;
            (start, start + gap.width)
        })
    }
}

/// Build the outline for `cards` (overlay-relative boxes) in the given case.
pub fn synthesize(case: ShapeCase, cards: &[PlacedCard], style: &OutlineStyle) -> Option<Shape> {
    let rects: Vec<Rect> = cards.iter().map(|card| card.rect).collect();
    let bounds = Rect::bounding(&rects)?.inflate(style.padding);

    let shape = match case {
        ShapeCase::Single | ShapeCase::HorizontalRun | ShapeCase::PerfectRectangle => {
            rounded_rect_shape(&bounds, style)
        }
        ShapeCase::Cutout => Shape::Path {
            path: cutout_path(cards, style),
            bounds,
        },
        ShapeCase::SplitDisjoint => Shape::Path {
            path: split_path(cards, style),
            bounds,
        },
    };
    Some(shape)
}

fn rounded_rect_shape(bounds: &Rect, style: &OutlineStyle) -> Shape {
    match style.gap_from(bounds.left) {
        Some(gap) => Shape::Path {
            path: rounded_polygon(&rect_vertices(bounds), style.corner_radius, Some(gap)).build(),
            bounds: *bounds,
        },
        None => Shape::Rect {
            left: bounds.left,
            top: bounds.top,
            width: bounds.width,
            height: bounds.height,
            border_radius: style.corner_radius,
        },
    }
}

/// Horizontal slab of the cutout outline covering one grid row.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Band {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

/// Per-row bands, padded horizontally, meeting halfway across row gaps.
fn row_bands(cards: &[PlacedCard], padding: f64) -> Vec<Band> {
    let mut by_row: BTreeMap<i64, Rect> = BTreeMap::new();
    for card in cards {
        by_row
            .entry(card.row)
            .and_modify(|span| *span = span.union(&card.rect))
            .or_insert(card.rect);
    }

    let spans: Vec<Rect> = by_row.into_values().collect();
    let mut bands = Vec::with_capacity(spans.len());
    for (index, span) in spans.iter().enumerate() {
        let top = match index.checked_sub(1).and_then(|prev| spans.get(prev)) {
            Some(prev) => (prev.bottom() + span.top) / 2.0,
            None => span.top - padding,
        };
        let bottom = match spans.get(index + 1) {
            Some(next) => (span.bottom() + next.top) / 2.0,
            None => span.bottom() + padding,
        };
        bands.push(Band {
            left: span.left - padding,
            right: span.right() + padding,
            top,
            bottom,
        });
    }
    bands
}

fn bands_connected(bands: &[Band]) -> bool {
    bands
        .windows(2)
        .all(|pair| pair[0].left < pair[1].right && pair[1].left < pair[0].right)
}

fn cutout_path(cards: &[PlacedCard], style: &OutlineStyle) -> String {
    let bands = row_bands(cards, style.padding);
    let Some(first) = bands.first() else {
        return String::new();
    };

    if !bands_connected(&bands) {
        log::debug!("Cutout rows do not overlap horizontally, outlining the bounding box");
        let rects: Vec<Rect> = cards.iter().map(|card| card.rect).collect();
        let bounds = Rect::bounding(&rects).unwrap_or_default().inflate(style.padding);
        return rounded_polygon(&rect_vertices(&bounds), style.corner_radius, style.gap_from(bounds.left)).build();
    }

    rounded_polygon(&band_vertices(&bands), style.corner_radius, style.gap_from(first.left)).build()
}

fn split_path(cards: &[PlacedCard], style: &OutlineStyle) -> String {
    let rows = rows_spanned(cards);
    let (Some(first_row), Some(last_row)) = (rows.first().copied(), rows.last().copied()) else {
        return String::new();
    };

    let group_box = |row: i64| {
        let rects: Vec<Rect> = cards
            .iter()
            .filter(|card| card.row == row)
            .map(|card| card.rect)
            .collect();
        Rect::bounding(&rects).unwrap_or_default().inflate(style.padding)
    };
    let upper = group_box(first_row);
    let lower = group_box(last_row);

    let overshoot = style.corner_radius * style.connector_overshoot;
    let upper_center = upper.left + upper.width / 2.0;
    let lower_center = lower.left + lower.width / 2.0;
    let (start, end) = if upper_center >= lower_center {
        (
            Point::new(upper.left + overshoot, upper.bottom()),
            Point::new(lower.right() - overshoot, lower.top),
        )
    } else {
        (
            Point::new(upper.right() - overshoot, upper.bottom()),
            Point::new(lower.left + overshoot, lower.top),
        )
    };

    let mut path = rounded_polygon(&rect_vertices(&upper), style.corner_radius, style.gap_from(upper.left));
    let mut connector = PathBuilder::new();
    connector.move_to(start).line_to(end);
    path.extend(connector);
    path.extend(rounded_polygon(&rect_vertices(&lower), style.corner_radius, None));
    path.build()
}

fn rect_vertices(rect: &Rect) -> Vec<Point> {
    vec![
        Point::new(rect.left, rect.top),
        Point::new(rect.right(), rect.top),
        Point::new(rect.right(), rect.bottom()),
        Point::new(rect.left, rect.bottom()),
    ]
}

/// Clockwise vertices of a stack of vertically contiguous bands.
fn band_vertices(bands: &[Band]) -> Vec<Point> {
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Vec::new();
    };

    let mut points = vec![
        Point::new(first.left, first.top),
        Point::new(first.right, first.top),
    ];
    for pair in bands.windows(2) {
        if pair[0].right != pair[1].right {
            points.push(Point::new(pair[0].right, pair[0].bottom));
            points.push(Point::new(pair[1].right, pair[0].bottom));
        }
    }
    points.push(Point::new(last.right, last.bottom));
    points.push(Point::new(last.left, last.bottom));
    for pair in bands.windows(2).rev() {
        if pair[0].left != pair[1].left {
            points.push(Point::new(pair[1].left, pair[1].top));
            points.push(Point::new(pair[0].left, pair[1].top));
        }
    }

    simplify(points)
}

/// Drop repeated and collinear vertices.
fn simplify(points: Vec<Point>) -> Vec<Point> {
    let mut deduped: Vec<Point> = Vec::with_capacity(points.len());
    for point in points {
        if deduped.last() != Some(&point) {
            deduped.push(point);
        }
    }
    if deduped.len() > 1 && deduped.first() == deduped.last() {
        deduped.pop();
    }

    let count = deduped.len();
    if count < 3 {
        return deduped;
    }
    // Keep index 0 so the outline still starts at the top-left corner.
    (0..count)
        .filter(|&i| {
            if i == 0 {
                return true;
            }
            let prev = deduped[(i + count - 1) % count];
            let point = deduped[i];
            let next = deduped[(i + 1) % count];
            turn(prev, point, next) != 0.0
        })
        .map(|i| deduped[i])
        .collect()
}

/// z of the cross product of (point - prev) × (next - point).
fn turn(prev: Point, point: Point, next: Point) -> f64 {
    let (ax, ay) = (point.x - prev.x, point.y - prev.y);
    let (bx, by) = (next.x - point.x, next.y - point.y);
    ax * by - ay * bx
}

struct Corner {
    entry: Point,
    exit: Point,
    radius: f64,
    convex: bool,
}

fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

fn step_towards(from: Point, to: Point, amount: f64) -> Point {
    let length = distance(from, to);
    if length == 0.0 {
        return from;
    }
    Point::new(
        from.x + (to.x - from.x) / length * amount,
        from.y + (to.y - from.y) / length * amount,
    )
}

/// Trace a clockwise orthogonal polygon with rounded corners.
///
/// With a gap, the top edge (vertex 0 → vertex 1) is left open between the
/// gap's x coordinates: the outline becomes two subpaths, one from the
/// top-left corner to the gap start and one from the gap end all the way
/// round back to the top-left corner.
fn rounded_polygon(vertices: &[Point], radius: f64, gap: Option<(f64, f64)>) -> PathBuilder {
    let mut path = PathBuilder::new();
    let count = vertices.len();
    if count < 3 {
        return path;
    }

    let corners: Vec<Corner> = (0..count)
        .map(|i| {
            let prev = vertices[(i + count - 1) % count];
            let point = vertices[i];
            let next = vertices[(i + 1) % count];
            let r = radius
                .min(distance(prev, point) / 2.0)
                .min(distance(point, next) / 2.0)
                .max(0.0);
            Corner {
                entry: step_towards(point, prev, r),
                exit: step_towards(point, next, r),
                radius: r,
                convex: turn(prev, point, next) > 0.0,
            }
        })
        .collect();

    let trace_from_second = |path: &mut PathBuilder| {
        for offset in 1..=count {
            let corner = &corners[offset % count];
            path.line_to(corner.entry);
            if corner.radius > 0.0 {
                path.arc_to(corner.radius, corner.convex, corner.exit);
            }
        }
    };

    match gap {
        Some((gap_start, gap_end)) => {
            let y = vertices[0].y;
            let edge_start = corners[0].exit.x;
            let edge_end = corners[1].entry.x;
            let start = gap_start.clamp(edge_start, edge_end);
            let end = gap_end.clamp(start, edge_end);
            if end - start < gap_end - gap_start {
                log::debug!(
                    "Badge gap {}..{} clipped to top edge {}..{}",
                    gap_start,
                    gap_end,
                    edge_start,
                    edge_end
                );
            }

            path.move_to(corners[0].exit).line_to(Point::new(start, y));
            path.move_to(Point::new(end, y));
            trace_from_second(&mut path);
        }
        None => {
            path.move_to(corners[0].exit);
            trace_from_second(&mut path);
            path.close();
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> GridSettings {
        GridSettings {
            cell_width: 220.0,
            cell_height: 180.0,
            gap: 20.0,
            container_width: 940.0,
            events_per_row: 4,
            border_radius: 8.0,
            badge_offset_x: 16.0,
        }
    }

    fn style(has_badge: bool) -> OutlineStyle {
        OutlineStyle::new(&OutlineSettings::default(), &grid(), has_badge)
    }

    fn flow(start: usize, count: usize) -> Vec<PlacedCard> {
        let grid = grid();
        (start..start + count)
            .map(|i| {
                let rect = grid.contract().cell_rect(i, grid.container_width, (0.0, 0.0));
                PlacedCard::locate(&rect, rect, &grid)
            })
            .collect()
    }

    #[test]
    fn test_single_without_badge_is_rect_descriptor() {
        let shape = synthesize(ShapeCase::Single, &flow(0, 1), &style(false)).unwrap();
        assert_eq!(
            shape,
            Shape::Rect {
                left: -8.0,
                top: -8.0,
                width: 236.0,
                height: 196.0,
                border_radius: 8.0
            }
        );
    }

    #[test]
    fn test_single_with_badge_has_top_gap() {
        let shape = synthesize(ShapeCase::Single, &flow(0, 1), &style(true)).unwrap();
        assert_eq!(
            shape.path().unwrap(),
            "M 0 -8 L 8 -8 M 148 -8 L 220 -8 A 8 8 0 0 1 228 0 L 228 180 A 8 8 0 0 1 220 188 \
             L 0 188 A 8 8 0 0 1 -8 180 L -8 0 A 8 8 0 0 1 0 -8"
        );
    }

    #[test]
    fn test_perfect_rectangle_width() {
        let shape = synthesize(ShapeCase::PerfectRectangle, &flow(0, 8), &style(true)).unwrap();
        let bounds = shape.bounds();
        assert_eq!(bounds.width, 4.0 * 220.0 + 3.0 * 20.0 + 16.0);
        assert_eq!(bounds.height, 2.0 * 180.0 + 20.0 + 16.0);
    }

    #[test]
    fn test_cutout_outline_has_one_concave_corner() {
        let shape = synthesize(ShapeCase::Cutout, &flow(0, 7), &style(false)).unwrap();
        let path = shape.path().unwrap();
        assert_eq!(path.matches(" 0 0 0 ").count(), 1, "{}", path);
        assert_eq!(path.matches(" 0 0 1 ").count(), 5, "{}", path);
        assert!(path.ends_with('Z'));
        assert_eq!(shape.bounds().height, 2.0 * 180.0 + 20.0 + 16.0);
    }

    #[test]
    fn test_cutout_path_vertices() {
        let shape = synthesize(ShapeCase::Cutout, &flow(0, 7), &style(false)).unwrap();
        // Row 0 spans the full width, row 1 ends after the third card; the
        // rows meet halfway across the 20px row gap at y = 190.
        assert_eq!(
            shape.path().unwrap(),
            "M 0 -8 L 940 -8 A 8 8 0 0 1 948 0 L 948 182 A 8 8 0 0 1 940 190 \
             L 716 190 A 8 8 0 0 0 708 198 L 708 380 A 8 8 0 0 1 700 388 \
             L 0 388 A 8 8 0 0 1 -8 380 L -8 0 A 8 8 0 0 1 0 -8 Z"
        );
    }

    #[test]
    fn test_split_has_three_fragments_and_overshooting_connector() {
        let shape = synthesize(ShapeCase::SplitDisjoint, &flow(2, 4), &style(true)).unwrap();
        let path = shape.path().unwrap();
        // upper group: cols 2-3 of row 0, lower group: cols 0-1 of row 1
        let connector = "M 484 188 L 456 192";
        assert!(path.contains(connector), "{}", path);
        assert_eq!(path.matches('Z').count(), 1);
        assert_eq!(path.matches('M').count(), 4);
        assert_eq!(shape.bounds(), Rect::new(-8.0, -8.0, 956.0, 396.0));
    }

    #[test]
    fn test_gap_starts_at_offset_and_is_badge_width() {
        for (case, cards) in [
            (ShapeCase::Single, flow(0, 1)),
            (ShapeCase::HorizontalRun, flow(0, 3)),
            (ShapeCase::PerfectRectangle, flow(0, 8)),
        ] {
            let shape = synthesize(case, &cards, &style(true)).unwrap();
            let bounds = shape.bounds();
            let path = shape.path().unwrap();
            let gap_start = bounds.left + 16.0;
            let expected = format!(
                "L {} {} M {} {}",
                gap_start,
                bounds.top,
                gap_start + 140.0,
                bounds.top
            );
            assert!(path.contains(&expected), "{}: {}", case, path);
        }
    }

    #[test]
    fn test_gap_anchors_on_the_first_row_for_cutout_and_split() {
        // cells 1..7 at four per row: first band starts at 240 - 8
        let cutout = synthesize(ShapeCase::Cutout, &flow(1, 7), &style(true)).unwrap();
        assert_eq!(cutout.bounds().left, -8.0);
        let path = cutout.path().unwrap();
        assert!(path.contains("L 248 -8 M 388 -8"), "{}", path);
        assert!(!path.contains("L 8 -8 M 148 -8"), "{}", path);

        // cell 3 alone on the first row: upper rectangle starts at 720 - 8
        let split = synthesize(ShapeCase::SplitDisjoint, &flow(3, 3), &style(true)).unwrap();
        assert_eq!(split.bounds().left, -8.0);
        let path = split.path().unwrap();
        assert!(path.contains("L 728 -8 M 868 -8"), "{}", path);
    }

    #[test]
    fn test_radius_is_clamped_on_short_edges() {
        let vertices = rect_vertices(&Rect::new(0.0, 0.0, 10.0, 40.0));
        let path = rounded_polygon(&vertices, 8.0, None).build();
        assert!(path.contains("A 5 5 0 0 1"), "{}", path);
    }

    #[test]
    fn test_simplify_drops_collinear_points() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert_eq!(simplify(points).len(), 4);
    }
}
