//! Filter controller: taxonomy, search, date and page state of one calendar,
//! applied either in place (client mode) or by a server round-trip.
//!
//! Server requests are split into [`FilterController::begin_server_request`]
//! and [`FilterController::complete_server_request`] so the host decides where
//! the HTTP call runs. Each request carries a generation number and only the
//! latest generation may touch the document.

pub mod api;
pub mod client;
pub mod query;

pub use api::{CalendarApi, RestCalendarApi};
pub use client::{apply_client_filters, ClientCriteria, ClientFilterOutcome};
pub use query::CalendarQuery;

use std::time::Instant;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dom::{classes, content_container, escape_text, CalendarDom, NodeId};
use crate::models::calendar_response::CalendarResponse;
use crate::models::filter::{DateRange, FilterState};
use crate::models::settings::OutlineSettings;
use crate::utils::debounce::Debouncer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every event is already in the document; filtering toggles visibility.
    Client,
    /// The server renders each filtered page.
    Server,
}

/// A server request handed to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub generation: u64,
    pub query: CalendarQuery,
}

/// What happened to a completed server request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    Applied { current_page: u32, max_pages: u32 },
    /// A newer request was issued; the response was dropped.
    Stale,
    /// The error was rendered inline in the content area.
    Failed(String),
}

#[derive(Debug)]
pub struct FilterController {
    root: NodeId,
    mode: FilterMode,
    filters: FilterState,
    search: String,
    date_range: DateRange,
    page: u32,
    show_past: bool,
    search_debounce: Debouncer,
    apply_requested: bool,
    generation: u64,
    in_flight: Option<u64>,
}

impl FilterController {
    pub fn new(root: NodeId, mode: FilterMode, settings: &OutlineSettings) -> Self {
        let delay = match mode {
            FilterMode::Client => settings.client_search_debounce(),
            FilterMode::Server => settings.server_search_debounce(),
        };
        Self {
            root,
            mode,
            filters: FilterState::new(),
            search: String::new(),
            date_range: DateRange::default(),
            page: 1,
            show_past: false,
            search_debounce: Debouncer::new(delay),
            apply_requested: false,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn show_past(&self) -> bool {
        self.show_past
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Toggle a taxonomy term checkbox.
    pub fn set_term(&mut self, taxonomy: &str, term: &str, checked: bool) {
        if self.filters.set_term(taxonomy, term, checked) {
            self.page = 1;
            self.apply_requested = true;
        }
    }

    /// Record search input. Applied once typing pauses for the debounce delay.
    pub fn set_search(&mut self, text: &str, now: Instant) {
        if self.search == text {
            return;
        }
        self.search = text.to_string();
        self.page = 1;
        self.search_debounce.trigger(now);
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        if self.date_range != range {
            self.date_range = range;
            self.page = 1;
            self.apply_requested = true;
        }
    }

    /// Reset taxonomy terms, search and dates.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search.clear();
        self.date_range = DateRange::default();
        self.page = 1;
        self.search_debounce.cancel();
        self.apply_requested = true;
    }

    /// Jump to a results page. Pages only exist in server mode.
    pub fn go_to_page(&mut self, page: u32) {
        let page = page.max(1);
        if self.mode == FilterMode::Server && self.page != page {
            self.page = page;
            self.apply_requested = true;
        }
    }

    /// Switch between upcoming and past events.
    pub fn set_show_past(&mut self, show_past: bool) {
        if self.show_past != show_past {
            self.show_past = show_past;
            self.page = 1;
            self.apply_requested = true;
        }
    }

    /// True once when the state changed and the change should be applied now.
    pub fn take_due(&mut self, now: Instant) -> bool {
        let search_due = self.search_debounce.poll(now);
        let due = self.apply_requested || search_due;
        if due {
            self.search_debounce.cancel();
            self.apply_requested = false;
        }
        due
    }

    pub fn query(&self) -> CalendarQuery {
        CalendarQuery {
            search: self.search.clone(),
            date_range: self.date_range,
            filters: self.filters.clone(),
            page: self.page,
            show_past: self.show_past,
        }
    }

    /// Toggle card visibility under the calendar root.
    pub fn apply_client<D: CalendarDom + ?Sized>(&self, dom: &mut D) -> ClientFilterOutcome {
        let criteria = ClientCriteria {
            filters: &self.filters,
            search: &self.search,
            date_range: &self.date_range,
        };
        apply_client_filters(dom, self.root, &criteria)
    }

    /// Start a server request: bump the generation and show the loading state.
    pub fn begin_server_request<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) -> PendingRequest {
        self.generation += 1;
        self.in_flight = Some(self.generation);
        let content = content_container(&*dom, self.root);
        dom.set_class(content, classes::LOADING, true);

        PendingRequest {
            generation: self.generation,
            query: self.query(),
        }
    }

    /// Apply a finished request if it is still the latest one.
    pub fn complete_server_request<D: CalendarDom + ?Sized>(
        &mut self,
        dom: &mut D,
        request: &PendingRequest,
        result: Result<CalendarResponse>,
    ) -> RequestOutcome {
        if request.generation != self.generation {
            log::debug!(
                "Discarding calendar response for generation {} (latest {})",
                request.generation,
                self.generation
            );
            return RequestOutcome::Stale;
        }

        self.in_flight = None;
        let content = content_container(&*dom, self.root);
        dom.set_class(content, classes::LOADING, false);

        let applied = result.and_then(|response| {
            self.replace_markup(dom, content, &response)?;
            Ok(response)
        });

        match applied {
            Ok(response) => {
                if response.pagination.current_page > 0 {
                    self.page = response.pagination.current_page;
                }
                RequestOutcome::Applied {
                    current_page: response.pagination.current_page,
                    max_pages: response.pagination.max_pages,
                }
            }
            Err(err) => {
                let message = format!("{:#}", err);
                log::warn!("Calendar request failed: {}", message);
                let markup = format!(
                    "<div class=\"{}\"><p>{}</p></div>",
                    classes::ERROR,
                    escape_text(&message)
                );
                if let Err(render_err) = dom.set_inner_html(content, &markup) {
                    log::error!("Failed to render calendar error: {:#}", render_err);
                }
                RequestOutcome::Failed(message)
            }
        }
    }

    /// Issue the current query through `api` and apply the result.
    pub fn run_server_request<D, A>(&mut self, dom: &mut D, api: &A) -> RequestOutcome
    where
        D: CalendarDom + ?Sized,
        A: CalendarApi + ?Sized,
    {
        let request = self.begin_server_request(dom);
        let result = api.fetch(&request.query);
        self.complete_server_request(dom, &request, result)
    }

    fn replace_markup<D: CalendarDom + ?Sized>(
        &self,
        dom: &mut D,
        content: NodeId,
        response: &CalendarResponse,
    ) -> Result<()> {
        dom.set_inner_html(content, &response.html)?;

        let chrome = [
            (classes::PAGINATION, response.pagination.html.as_str()),
            (classes::RESULTS_COUNTER, response.counter.as_str()),
            (classes::PAST_NAVIGATION, response.navigation.html.as_str()),
        ];
        for (class, html) in chrome {
            match dom.query(self.root, class) {
                Some(node) => dom.set_inner_html(node, html)?,
                None => log::debug!("Calendar has no .{} element to update", class),
            }
        }
        Ok(())
    }
}
