//! Five-way shape classification of a day group.
//!
//! The order of the checks matters: a two-row group whose rows share no
//! column is split before the remainder test runs, so an ambiguous two-row
//! layout renders as a connected pair rather than an L.

use std::collections::BTreeSet;

use crate::models::geometry::Rect;
use crate::models::grid::GridSettings;
use crate::models::shape::ShapeCase;

/// An event card's box with its inferred grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCard {
    /// Box relative to the border overlay
    pub rect: Rect,
    pub row: i64,
    pub column: i64,
}

impl PlacedCard {
    /// Infer the grid cell from the grid-container-relative box and keep the
    /// overlay-relative box for drawing.
    pub fn locate(grid_relative: &Rect, overlay_relative: Rect, grid: &GridSettings) -> Self {
        Self {
            rect: overlay_relative,
            row: grid.row_of(grid_relative),
            column: grid.column_of(grid_relative),
        }
    }
}

/// Distinct rows, ascending.
pub fn rows_spanned(cards: &[PlacedCard]) -> BTreeSet<i64> {
    cards.iter().map(|card| card.row).collect()
}

fn columns_in_row(cards: &[PlacedCard], row: i64) -> BTreeSet<i64> {
    cards
        .iter()
        .filter(|card| card.row == row)
        .map(|card| card.column)
        .collect()
}

/// True for exactly two rows whose occupied columns do not intersect.
pub fn is_split_disjoint(cards: &[PlacedCard]) -> bool {
    let rows = rows_spanned(cards);
    if rows.len() != 2 {
        return false;
    }
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return false;
    };
    columns_in_row(cards, *first).is_disjoint(&columns_in_row(cards, *last))
}

pub fn classify(cards: &[PlacedCard], grid: &GridSettings) -> ShapeCase {
    if cards.len() <= 1 {
        return ShapeCase::Single;
    }

    if rows_spanned(cards).len() == 1 {
        return ShapeCase::HorizontalRun;
    }

    if is_split_disjoint(cards) {
        return ShapeCase::SplitDisjoint;
    }

    let events_per_row = grid.events_per_row.max(1);
    if cards.len() % events_per_row == 0 {
        ShapeCase::PerfectRectangle
    } else {
        ShapeCase::Cutout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

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

    fn card_at(grid: &GridSettings, row: i64, column: i64) -> PlacedCard {
        let rect = Rect::new(
            column as f64 * (grid.cell_width + grid.gap),
            row as f64 * (grid.cell_height + grid.gap),
            grid.cell_width,
            grid.cell_height,
        );
        PlacedCard::locate(&rect, rect, grid)
    }

    /// `count` cards flowing from cell `start` of an auto-placed grid.
    fn flow(grid: &GridSettings, start: usize, count: usize) -> Vec<PlacedCard> {
        let per_row = grid.events_per_row;
        (start..start + count)
            .map(|i| card_at(grid, (i / per_row) as i64, (i % per_row) as i64))
            .collect()
    }

    #[test]
    fn test_locate_infers_row_and_column() {
        let grid = grid(4);
        let card = card_at(&grid, 2, 3);
        assert_eq!((card.row, card.column), (2, 3));
    }

    #[test]
    fn test_locate_tolerates_subpixel_offsets() {
        let grid = grid(4);
        let rect = Rect::new(239.6, 199.4, 220.0, 180.0);
        let card = PlacedCard::locate(&rect, rect, &grid);
        assert_eq!((card.row, card.column), (1, 1));
    }

    #[test_case(0, 1 => ShapeCase::Single; "one card")]
    #[test_case(0, 3 => ShapeCase::HorizontalRun; "three cards in one row")]
    #[test_case(1, 3 => ShapeCase::HorizontalRun; "run starting mid row")]
    #[test_case(0, 8 => ShapeCase::PerfectRectangle; "two full rows")]
    #[test_case(0, 4 => ShapeCase::HorizontalRun; "one full row")]
    #[test_case(0, 7 => ShapeCase::Cutout; "wrapped with remainder three")]
    #[test_case(0, 9 => ShapeCase::Cutout; "three rows remainder one")]
    #[test_case(2, 4 => ShapeCase::SplitDisjoint; "two and two wrapped")]
    #[test_case(3, 2 => ShapeCase::SplitDisjoint; "one and one wrapped")]
    #[test_case(1, 6 => ShapeCase::Cutout; "wrapped with shared columns")]
    fn test_classify_flow(start: usize, count: usize) -> ShapeCase {
        let grid = grid(4);
        classify(&flow(&grid, start, count), &grid)
    }

    #[test]
    fn test_split_check_runs_before_remainder() {
        // 4 cards with events_per_row 4 would be a perfect rectangle by count
        let grid = grid(4);
        let cards = flow(&grid, 2, 4);
        assert_eq!(cards.len() % grid.events_per_row, 0);
        assert_eq!(classify(&cards, &grid), ShapeCase::SplitDisjoint);
    }

    #[test]
    fn test_rows_zero_and_two_sharing_columns_is_cutout() {
        let grid = grid(4);
        let cards = vec![
            card_at(&grid, 0, 0),
            card_at(&grid, 0, 1),
            card_at(&grid, 0, 2),
            card_at(&grid, 2, 0),
            card_at(&grid, 2, 1),
        ];
        assert!(!is_split_disjoint(&cards));
        assert_eq!(classify(&cards, &grid), ShapeCase::Cutout);
    }

    #[test]
    fn test_three_rows_are_never_split() {
        let grid = grid(2);
        let cards = vec![card_at(&grid, 0, 1), card_at(&grid, 1, 0), card_at(&grid, 2, 1)];
        assert_eq!(classify(&cards, &grid), ShapeCase::Cutout);
    }
}
