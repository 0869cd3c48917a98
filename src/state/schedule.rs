// Schedule tab state management.
// Handles the selected day or month, its lessons, and list selection.

use chrono::{Datelike, Duration, NaiveDate};
use ratatui::widgets::ListState;

use crate::api::{AuthClient, LessonItem};
use crate::cache::{CacheStore, SCHEDULE_TODAY, keys, ttl};
use crate::revalidate::FlowHandle;

use super::resource::SharedResource;

/// What the schedule tab is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleView {
    Day(NaiveDate),
    Month(NaiveDate),
}

/// Complete state for the schedule tab.
#[derive(Debug)]
pub struct ScheduleTabState {
    /// Current view.
    pub view: ScheduleView,
    /// The local date treated as "today".
    pub today: NaiveDate,
    /// Lessons for the current view.
    pub lessons: SharedResource<Vec<LessonItem>>,
    /// Selection within the lessons list.
    pub list_state: ListState,
    flow: Option<FlowHandle>,
}

impl ScheduleTabState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: ScheduleView::Day(today),
            today,
            lessons: SharedResource::new(),
            list_state: ListState::default(),
            flow: None,
        }
    }

    /// Cache key for the current view.
    pub fn cache_key(&self) -> String {
        match self.view {
            ScheduleView::Day(date) if date == self.today => SCHEDULE_TODAY.to_string(),
            ScheduleView::Day(date) => keys::schedule_day(date),
            ScheduleView::Month(date) => keys::schedule_month(date),
        }
    }

    /// Get the display title for the current view.
    pub fn title(&self) -> String {
        match self.view {
            ScheduleView::Day(date) if date == self.today => "Today".to_string(),
            ScheduleView::Day(date) => date.format("%a %d %b %Y").to_string(),
            ScheduleView::Month(date) => date.format("%B %Y").to_string(),
        }
    }

    /// Revalidate the current view.
    pub fn load(&mut self, store: &CacheStore, client: &AuthClient) {
        self.discard();

        let client = client.clone();
        let view = self.view;
        let today = self.today;
        let fetch = async move {
            match view {
                ScheduleView::Day(date) if date == today => client.get_schedule_today().await,
                ScheduleView::Day(date) => client.get_schedule_by_date(date).await,
                ScheduleView::Month(date) => client.get_schedule_month(date).await,
            }
        };

        self.flow = Some(FlowHandle::spawn(
            store.clone(),
            self.cache_key(),
            ttl::SCHEDULE,
            self.lessons.clone(),
            fetch,
        ));
        self.reset_selection();
    }

    /// Drop the result of any in-flight load.
    pub fn discard(&mut self) {
        if let Some(flow) = self.flow.take() {
            flow.discard();
        }
    }

    /// Switch view. Data from the previous view is dropped, never mixed in.
    pub fn set_view(&mut self, view: ScheduleView) -> bool {
        if view == self.view {
            return false;
        }
        self.discard();
        self.view = view;
        self.lessons.reset();
        self.list_state.select(None);
        true
    }

    /// Show the day after the current one.
    pub fn next_day(&mut self) -> bool {
        let date = self.anchor_date() + Duration::days(1);
        self.set_view(ScheduleView::Day(date))
    }

    /// Show the day before the current one.
    pub fn prev_day(&mut self) -> bool {
        let date = self.anchor_date() - Duration::days(1);
        self.set_view(ScheduleView::Day(date))
    }

    /// Jump back to today.
    pub fn go_today(&mut self) -> bool {
        self.set_view(ScheduleView::Day(self.today))
    }

    /// Toggle between the day view and the whole month.
    pub fn toggle_month(&mut self) -> bool {
        let view = match self.view {
            ScheduleView::Day(date) => ScheduleView::Month(date),
            ScheduleView::Month(date) if same_month(date, self.today) => {
                ScheduleView::Day(self.today)
            }
            ScheduleView::Month(date) => ScheduleView::Day(date),
        };
        self.set_view(view)
    }

    /// Select the next lesson in the list.
    pub fn select_next(&mut self) {
        let len = self.lesson_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous lesson in the list.
    pub fn select_prev(&mut self) {
        if self.lesson_count() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn lesson_count(&self) -> usize {
        self.lessons.lock().data.as_ref().map_or(0, Vec::len)
    }

    fn reset_selection(&mut self) {
        if self.lesson_count() > 0 {
            self.list_state.select(Some(0));
        } else {
            self.list_state.select(None);
        }
    }

    fn anchor_date(&self) -> NaiveDate {
        match self.view {
            ScheduleView::Day(date) | ScheduleView::Month(date) => date,
        }
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::session::Session;
    use crate::state::LoadStatus;
    use crate::storage::MemoryStorage;
    use crate::testing::{MockTransport, Reply, lesson};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_cache_key_follows_view() {
        let mut state = ScheduleTabState::new(today());
        assert_eq!(state.cache_key(), SCHEDULE_TODAY);
        assert_eq!(state.title(), "Today");

        state.next_day();
        assert_eq!(state.cache_key(), "cache:schedule:day:2026-03-03");

        state.toggle_month();
        assert_eq!(state.cache_key(), "cache:schedule:month:2026-03");
        assert_eq!(state.title(), "March 2026");

        state.toggle_month();
        assert_eq!(state.view, ScheduleView::Day(today()));
    }

    #[test]
    fn test_changing_view_drops_previous_lessons() {
        let mut state = ScheduleTabState::new(today());
        {
            let mut lessons = state.lessons.lock();
            lessons.data = Some(vec![lesson("Math")]);
        }

        assert!(state.prev_day());
        assert_eq!(state.lessons.snapshot().data, None);
        assert!(!state.set_view(state.view));
        assert!(state.go_today());
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = ScheduleTabState::new(today());
        state.select_next();
        assert_eq!(state.list_state.selected(), None);

        state.lessons.lock().data = Some(vec![lesson("Math"), lesson("Art")]);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.list_state.selected(), Some(1));
        state.select_prev();
        state.select_prev();
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[tokio::test]
    async fn test_load_fetches_selected_day() {
        let storage = Arc::new(MemoryStorage::new());
        let store = CacheStore::new(storage.clone());
        let transport = Arc::new(MockTransport::new([Reply::ok_json(json!([lesson("Art")]))]));
        let client = AuthClient::new(transport.clone(), Session::restore(storage));

        let mut state = ScheduleTabState::new(today());
        state.next_day();
        state.load(&store, &client);

        let flow = state.flow.take().unwrap();
        flow.outcome().await;

        assert_eq!(state.lessons.snapshot().status, LoadStatus::Success);
        let request = &transport.requests()[0];
        assert_eq!(request.path, crate::api::routes::SCHEDULE_BY_DATE);
        assert_eq!(request.query[0].1, "2026-03-03");
        assert_eq!(
            store.get::<Vec<LessonItem>>("cache:schedule:day:2026-03-03"),
            Some(vec![lesson("Art")])
        );
    }
}
