// Calendar query
// Server-mode request parameters and their URL encoding

use chrono::NaiveDate;

use crate::models::filter::{DateRange, FilterState};
use crate::utils::date::format_query_date;

/// REST route serving rendered calendar fragments.
pub const CALENDAR_ROUTE: &str = "/wp-json/datamachine-events/v1/calendar";

/// Everything the server needs to render one page of the calendar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarQuery {
    pub search: String,
    pub date_range: DateRange,
    pub filters: FilterState,
    pub page: u32,
    pub show_past: bool,
}

impl CalendarQuery {
    /// Query-string pairs in a stable order. Empty values are omitted and
    /// page 1 is implied.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("event_search".to_string(), search.to_string()));
        }
        if let Some(start) = self.date_range.start {
            pairs.push(("date_start".to_string(), format_query_date(start)));
        }
        if let Some(end) = self.date_range.end {
            pairs.push(("date_end".to_string(), format_query_date(end)));
        }
        for (taxonomy, terms) in self.filters.active() {
            for term in terms {
                pairs.push((format!("tax_filter[{}][]", taxonomy), term.clone()));
            }
        }
        if self.page > 1 {
            pairs.push(("paged".to_string(), self.page.to_string()));
        }
        if self.show_past {
            pairs.push(("past".to_string(), "1".to_string()));
        }

        pairs
    }

    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full request URL against `base_url` (scheme and host, no trailing route).
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let query = self.to_query_string();
        if query.is_empty() {
            format!("{}{}", base, CALENDAR_ROUTE)
        } else {
            format!("{}{}?{}", base, CALENDAR_ROUTE, query)
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = DateRange::new(start, end);
        self
    }
}
