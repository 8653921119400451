//! Taxonomy filter selections and the visibility law applied to event cards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Selected term ids per taxonomy slug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    selected: BTreeMap<String, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a checkbox change. Returns true when the state changed.
    pub fn set_term(&mut self, taxonomy: &str, term: &str, checked: bool) -> bool {
        if checked {
            return self
                .selected
                .entry(taxonomy.to_string())
                .or_default()
                .insert(term.to_string());
        }

        let Some(terms) = self.selected.get_mut(taxonomy) else {
            return false;
        };
        let removed = terms.remove(term);
        if terms.is_empty() {
            self.selected.remove(taxonomy);
        }
        removed
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Taxonomies with at least one selected term, with their terms.
    pub fn active(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.selected
            .iter()
            .filter(|(_, terms)| !terms.is_empty())
            .map(|(taxonomy, terms)| (taxonomy.as_str(), terms))
    }

    /// AND across taxonomies, OR within one taxonomy.
    ///
    /// `badges` are the (taxonomy, term) pairs an event card carries. A card
    /// with no badge of an active taxonomy does not match.
    pub fn matches<'a, I>(&self, badges: I) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
    {
        self.active().all(|(taxonomy, terms)| {
            badges
                .clone()
                .into_iter()
                .any(|(badge_taxonomy, term)| badge_taxonomy == taxonomy && terms.contains(term))
        })
    }
}

/// Inclusive date window, either end optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}
