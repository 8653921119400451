//! One calendar block on the page.
//!
//! A surface owns the border renderer, badge renderer and filter controller of
//! a single calendar root. Surfaces share nothing, so any number of calendars
//! can live in one document.

use std::time::Instant;

use anyhow::Result;

use crate::dom::{find_calendar_roots, CalendarDom, NodeId};
use crate::models::calendar_response::CalendarResponse;
use crate::models::settings::OutlineSettings;
use crate::services::badge::BadgeRenderer;
use crate::services::border::BorderRenderer;
use crate::services::filter::{
    CalendarApi, ClientFilterOutcome, FilterController, FilterMode, PendingRequest, RequestOutcome,
};

pub struct CalendarSurface {
    root: NodeId,
    borders: BorderRenderer,
    badges: BadgeRenderer,
    filters: FilterController,
}

impl CalendarSurface {
    /// Attach to `root` and render borders and badges once.
    pub fn new<D: CalendarDom + ?Sized>(
        dom: &mut D,
        root: NodeId,
        mode: FilterMode,
        settings: &OutlineSettings,
    ) -> Self {
        Self {
            root,
            borders: BorderRenderer::new(dom, root, settings.clone()),
            badges: BadgeRenderer::new(dom, root, settings.clone()),
            filters: FilterController::new(root, mode, settings),
        }
    }

    /// One surface per calendar root under `scope`.
    pub fn attach_all<D: CalendarDom + ?Sized>(
        dom: &mut D,
        scope: NodeId,
        mode: FilterMode,
        settings: &OutlineSettings,
    ) -> Vec<Self> {
        let roots = find_calendar_roots(&*dom, scope);
        log::debug!("Attaching {} calendar surfaces", roots.len());
        roots
            .into_iter()
            .map(|root| Self::new(dom, root, mode, settings))
            .collect()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn borders(&self) -> &BorderRenderer {
        &self.borders
    }

    pub fn badges(&self) -> &BadgeRenderer {
        &self.badges
    }

    pub fn filters(&self) -> &FilterController {
        &self.filters
    }

    /// Mutate filter state; changes take effect on the next `tick`.
    pub fn filters_mut(&mut self) -> &mut FilterController {
        &mut self.filters
    }

    pub fn on_resize(&mut self, now: Instant) {
        self.borders.on_resize(now);
        self.badges.on_resize(now);
    }

    pub fn refresh(&mut self, now: Instant) {
        self.borders.refresh(now);
        self.badges.refresh(now);
    }

    /// Advance timers.
    ///
    /// In client mode a due filter change is applied in place. In server mode
    /// it is returned as a request for the host to run and hand back through
    /// [`CalendarSurface::complete_request`].
    pub fn tick<D: CalendarDom + ?Sized>(&mut self, dom: &mut D, now: Instant) -> Option<PendingRequest> {
        let mut request = None;
        if self.filters.take_due(now) {
            match self.filters.mode() {
                FilterMode::Client => {
                    self.apply_client(dom, now);
                }
                FilterMode::Server => request = Some(self.filters.begin_server_request(dom)),
            }
        }

        self.borders.tick(dom, now);
        self.badges.tick(dom, now);
        request
    }

    /// Like `tick`, running any server request through `api` immediately.
    pub fn tick_with<D, A>(&mut self, dom: &mut D, api: &A, now: Instant) -> Option<RequestOutcome>
    where
        D: CalendarDom + ?Sized,
        A: CalendarApi + ?Sized,
    {
        let request = self.tick(dom, now)?;
        let result = api.fetch(&request.query);
        Some(self.complete_request(dom, &request, result, now))
    }

    pub fn complete_request<D: CalendarDom + ?Sized>(
        &mut self,
        dom: &mut D,
        request: &PendingRequest,
        result: Result<CalendarResponse>,
        now: Instant,
    ) -> RequestOutcome {
        let outcome = self.filters.complete_server_request(dom, request, result);
        if outcome != RequestOutcome::Stale {
            self.refresh(now);
        }
        outcome
    }

    fn apply_client<D: CalendarDom + ?Sized>(&mut self, dom: &mut D, now: Instant) -> ClientFilterOutcome {
        let outcome = self.filters.apply_client(dom);
        self.refresh(now);
        outcome
    }

    pub fn destroy<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) {
        self.borders.destroy(dom);
        self.badges.destroy(dom);
        log::debug!("Destroyed calendar surface {:?}", self.root);
    }
}
