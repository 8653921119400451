//! Shape classification and SVG path synthesis for day groups.

pub mod classifier;
pub mod path;
pub mod synthesizer;

pub use classifier::{classify, PlacedCard};
pub use synthesizer::{synthesize, BadgeGap, OutlineStyle};

use crate::models::grid::GridSettings;
use crate::models::settings::OutlineSettings;
use crate::models::shape::{Shape, ShapeCase};

/// Classify `cards` and build the matching outline.
pub fn outline_for(
    cards: &[PlacedCard],
    grid: &GridSettings,
    settings: &OutlineSettings,
    has_badge: bool,
) -> Option<(ShapeCase, Shape)> {
    let case = classify(cards, grid);
    let style = OutlineStyle::new(settings, grid, has_badge);
    synthesize(case, cards, &style).map(|shape| (case, shape))
}
