// Test fixtures - synthetic calendar layouts
// Builds MemoryDocument calendars whose card boxes follow the grid contract

#![allow(dead_code)]

use std::collections::BTreeMap;

use calendar_outline::dom::{ElementSpec, MemoryDocument, NodeId};
use calendar_outline::models::geometry::Rect;
use calendar_outline::models::grid::{GridDefaults, GridLayoutContract};
use calendar_outline::services::grid_metrics::grid_css_variables;

pub const CONTRACT: GridLayoutContract = GridLayoutContract {
    cell_width: 220.0,
    cell_height: 180.0,
    gap: 20.0,
};

/// Four columns: (940 + 20) / (220 + 20)
pub const WIDTH: f64 = 940.0;
pub const ORIGIN: (f64, f64) = (40.0, 100.0);

/// One event card of a fixture day.
#[derive(Debug, Clone)]
pub struct Card {
    pub cell: usize,
    pub title: String,
    pub date: String,
    pub terms: Vec<(String, String)>,
}

impl Card {
    pub fn new(cell: usize, title: &str, date: &str) -> Self {
        Self {
            cell,
            title: title.to_string(),
            date: date.to_string(),
            terms: Vec::new(),
        }
    }

    pub fn term(mut self, taxonomy: &str, term: &str) -> Self {
        self.terms.push((taxonomy.to_string(), term.to_string()));
        self
    }
}

/// A `dm-date-group` container with its weekday slug.
#[derive(Debug, Clone)]
pub struct Day {
    pub slug: String,
    pub cards: Vec<Card>,
    pub badge: bool,
}

impl Day {
    pub fn new(slug: &str, cards: Vec<Card>) -> Self {
        Self {
            slug: slug.to_string(),
            cards,
            badge: true,
        }
    }

    pub fn without_badge(mut self) -> Self {
        self.badge = false;
        self
    }
}

/// Days whose cards flow one after another through the grid, as auto
/// placement lays them out. `counts` pairs a weekday slug with a card count.
pub fn flowing_days(counts: &[(&str, usize)]) -> Vec<Day> {
    let mut cell = 0;
    counts
        .iter()
        .enumerate()
        .map(|(day_index, (slug, count))| {
            let cards = (0..*count)
                .map(|i| {
                    Card::new(
                        cell + i,
                        &format!("{} event {}", slug, i + 1),
                        &format!("2025-06-{:02}T{:02}:00:00", 13 + day_index, 10 + i),
                    )
                })
                .collect();
            cell += count;
            Day::new(slug, cards)
        })
        .collect()
}

/// The `:root` custom properties the grid stylesheet publishes for the
/// default grid, which matches `CONTRACT`.
pub fn grid_css() -> BTreeMap<String, String> {
    grid_css_variables(&GridDefaults::default())
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

pub fn content_rect() -> Rect {
    content_rect_at(WIDTH)
}

pub fn content_rect_at(width: f64) -> Rect {
    Rect::new(ORIGIN.0, ORIGIN.1, width, 1200.0)
}

/// Calendar block markup: content grid, border overlay and the chrome the
/// server mode rewrites.
pub fn calendar_spec(days: &[Day]) -> ElementSpec {
    calendar_spec_at(days, WIDTH)
}

/// Same block with the content grid `width` wide and the cards placed for
/// that many columns.
pub fn calendar_spec_at(days: &[Day], width: f64) -> ElementSpec {
    let groups = days.iter().map(|day| {
        let mut group = ElementSpec::div()
            .class("dm-date-group")
            .class(format!("dm-day-{}", day.slug));
        if day.badge {
            group = group.child(ElementSpec::div().class("dm-day-badge").text(day.slug.clone()));
        }
        group.children(day.cards.iter().map(|card| card_spec_at(card, width)))
    });

    ElementSpec::div()
        .class("datamachine-events-calendar")
        .child(ElementSpec::div().class("datamachine-events-results-counter"))
        .child(
            ElementSpec::div()
                .class("datamachine-events-content")
                .rect(content_rect_at(width))
                .children(groups),
        )
        .child(ElementSpec::new("svg").class("dm-border-overlay").rect(content_rect_at(width)))
        .child(ElementSpec::div().class("datamachine-events-pagination"))
        .child(ElementSpec::div().class("datamachine-events-past-navigation"))
}

pub fn card_spec(card: &Card) -> ElementSpec {
    card_spec_at(card, WIDTH)
}

pub fn card_spec_at(card: &Card, width: f64) -> ElementSpec {
    ElementSpec::div()
        .class("dm-event-item")
        .attr("data-date", card.date.clone())
        .rect(CONTRACT.cell_rect(card.cell, width, ORIGIN))
        .child(ElementSpec::new("h4").text(card.title.clone()))
        .children(card.terms.iter().map(|(taxonomy, term)| {
            ElementSpec::new("span")
                .class("dm-taxonomy-badge")
                .attr("data-taxonomy", taxonomy.clone())
                .attr("data-term", term.clone())
        }))
}

pub fn calendar(days: &[Day]) -> (MemoryDocument, NodeId) {
    calendar_at_width(days, WIDTH)
}

pub fn calendar_at_width(days: &[Day], width: f64) -> (MemoryDocument, NodeId) {
    MemoryDocument::from_spec(&grid_css(), &calendar_spec_at(days, width))
}
