// Property-based tests for shape classification and outline geometry
// Random day layouts flowing through the grid

#[path = "../fixtures/mod.rs"]
mod fixtures;

use proptest::prelude::*;

use calendar_outline::dom::CalendarDom;
use calendar_outline::models::geometry::Rect;
use calendar_outline::models::grid::GridSettings;
use calendar_outline::models::settings::OutlineSettings;
use calendar_outline::models::shape::ShapeCase;
use calendar_outline::services::border::compute_outlines;
use calendar_outline::services::shape::{classify, PlacedCard};

const SLUGS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn grid(events_per_row: usize) -> GridSettings {
    GridSettings {
        cell_width: 220.0,
        cell_height: 180.0,
        gap: 20.0,
        container_width: events_per_row as f64 * 240.0 - 20.0,
        events_per_row,
        border_radius: 8.0,
        badge_offset_x: 16.0,
    }
}

fn placed(grid: &GridSettings, cells: &[usize]) -> Vec<PlacedCard> {
    cells
        .iter()
        .map(|cell| {
            let rect = grid.contract().cell_rect(*cell, grid.container_width, (0.0, 0.0));
            PlacedCard::locate(&rect, rect, grid)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_classification_ignores_card_order(
        per_row in 1usize..7,
        start in 0usize..12,
        count in 1usize..15,
    ) {
        let grid = grid(per_row);
        let cells: Vec<usize> = (start..start + count).collect();
        let mut reversed = cells.clone();
        reversed.reverse();

        prop_assert_eq!(
            classify(&placed(&grid, &cells), &grid),
            classify(&placed(&grid, &reversed), &grid)
        );
    }

    #[test]
    fn prop_single_row_flows_are_runs(per_row in 1usize..7, count in 2usize..7) {
        prop_assume!(count <= per_row);
        let grid = grid(per_row);
        let cells: Vec<usize> = (0..count).collect();
        prop_assert_eq!(classify(&placed(&grid, &cells), &grid), ShapeCase::HorizontalRun);
    }

    #[test]
    fn prop_outlines_are_deterministic_and_contain_cards(
        counts in prop::collection::vec(1usize..10, 1..6),
    ) {
        let days: Vec<(&str, usize)> = counts
            .iter()
            .enumerate()
            .map(|(index, count)| (SLUGS[index % SLUGS.len()], *count))
            .collect();
        let (doc, root) = fixtures::calendar(&fixtures::flowing_days(&days));
        let overlay = doc.query(root, "dm-border-overlay").unwrap();
        let origin = doc.bounding_rect(overlay);
        let settings = OutlineSettings::default();

        let first = compute_outlines(&doc, root, &origin, &settings);
        let second = compute_outlines(&doc, root, &origin, &settings);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), days.len());

        for outline in &first {
            let bounds = outline.shape.bounds();
            for event in &outline.events {
                let card: Rect = doc.bounding_rect(*event).relative_to(&origin).inflate(settings.padding);
                prop_assert!(bounds.contains(&card));
            }
        }
    }
}
