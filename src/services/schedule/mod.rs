// Render scheduling shared by the border and badge renderers:
// resize observer registration plus the resize/refresh debounce timers.

use std::time::Instant;

use crate::dom::{CalendarDom, NodeId, ObserverId};
use crate::models::settings::OutlineSettings;
use crate::utils::debounce::Debouncer;

#[derive(Debug)]
pub struct RenderSchedule {
    resize: Debouncer,
    refresh: Debouncer,
    observer: Option<ObserverId>,
    destroyed: bool,
}

impl RenderSchedule {
    pub fn new(settings: &OutlineSettings) -> Self {
        Self {
            resize: Debouncer::new(settings.resize_debounce()),
            refresh: Debouncer::new(settings.refresh_debounce()),
            observer: None,
            destroyed: false,
        }
    }

    /// Register a resize observer on `node`, replacing any previous one.
    pub fn observe<D: CalendarDom + ?Sized>(&mut self, dom: &mut D, node: NodeId) {
        if let Some(previous) = self.observer.take() {
            dom.disconnect_observer(previous);
        }
        self.observer = Some(dom.observe_resize(node));
    }

    pub fn on_resize(&mut self, now: Instant) {
        if !self.destroyed {
            self.resize.trigger(now);
        }
    }

    pub fn request_refresh(&mut self, now: Instant) {
        if !self.destroyed {
            self.refresh.trigger(now);
        }
    }

    /// True when either timer fired. Both are polled so one render covers both.
    pub fn due(&mut self, now: Instant) -> bool {
        let resize_due = self.resize.poll(now);
        let refresh_due = self.refresh.poll(now);
        !self.destroyed && (resize_due || refresh_due)
    }

    pub fn is_pending(&self) -> bool {
        self.resize.is_pending() || self.refresh.is_pending()
    }

    /// Disconnect the observer and drop pending timers.
    pub fn destroy<D: CalendarDom + ?Sized>(&mut self, dom: &mut D) {
        if let Some(observer) = self.observer.take() {
            dom.disconnect_observer(observer);
        }
        self.resize.cancel();
        self.refresh.cancel();
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDocument;
    use std::time::Duration;

    #[test]
    fn test_resize_and_refresh_share_one_render() {
        let mut schedule = RenderSchedule::new(&OutlineSettings::default());
        let start = Instant::now();
        schedule.on_resize(start);
        schedule.request_refresh(start + Duration::from_millis(290));

        assert!(schedule.due(start + Duration::from_millis(340)));
        assert!(!schedule.due(start + Duration::from_millis(340)));
        assert!(!schedule.is_pending());
    }

    #[test]
    fn test_destroy_disconnects_and_ignores_later_triggers() {
        let mut dom = MemoryDocument::new();
        let body = dom.body();
        let mut schedule = RenderSchedule::new(&OutlineSettings::default());
        schedule.observe(&mut dom, body);
        assert_eq!(dom.active_observers(), 1);

        let start = Instant::now();
        schedule.on_resize(start);
        schedule.destroy(&mut dom);
        schedule.on_resize(start);

        assert_eq!(dom.active_observers(), 0);
        assert!(!schedule.is_pending());
        assert!(!schedule.due(start + Duration::from_secs(1)));
    }
}
