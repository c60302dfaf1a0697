//! Reconciliation of paging, sorting and filter triggers.
//!
//! The controller keeps the paging/sort/filter memory of one list view and
//! folds every trigger into it. Each fold yields a candidate request; a
//! candidate equal to the last emitted one is dropped, so a URL rewrite that
//! is decoded again ends the loop after one round trip.

use contracts::shared::filter::FilterState;
use contracts::shared::list_request::{EffectiveRequest, ListRequest, SortDirection};
use contracts::shared::query_string::QueryStringCodec;

/// Owner of the address bar. Always a full query replace, never a push.
pub trait HistoryWriter {
    fn replace_query(&mut self, query: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortChange {
    pub order_by: String,
    pub direction: SortDirection,
}

impl SortChange {
    pub fn new(order_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            order_by: order_by.into(),
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTrigger {
    Page { page_index: u32, page_size: u32 },
    Sort(SortChange),
    Filter(FilterState),
}

/// Result of an inbound URL change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Decoded URL; its filter is what the filter form gets synchronized to
    pub snapshot: EffectiveRequest,
    /// `Some` unless the URL decodes to the request emitted last
    pub emitted: Option<EffectiveRequest>,
}

pub struct ListStateController<H> {
    codec: QueryStringCodec,
    history: H,
    page_index: u32,
    page_size: u32,
    sort: SortChange,
    filter: FilterState,
    last_emitted: Option<EffectiveRequest>,
}

impl<H: HistoryWriter> ListStateController<H> {
    pub fn new(codec: QueryStringCodec, history: H) -> Self {
        let defaults = codec.defaults().clone();
        Self {
            page_index: defaults.list.page_index,
            page_size: defaults.list.page_size,
            sort: SortChange::new(defaults.list.order_by, defaults.list.order_direction),
            filter: defaults.filter,
            last_emitted: None,
            codec,
            history,
        }
    }

    pub fn codec(&self) -> &QueryStringCodec {
        &self.codec
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn last_emitted(&self) -> Option<&EffectiveRequest> {
        self.last_emitted.as_ref()
    }

    /// Merge of the current paging, sort and filter memory.
    pub fn current_request(&self) -> EffectiveRequest {
        let list = ListRequest {
            order_by: self.sort.order_by.clone(),
            order_direction: self.sort.direction,
            page_index: self.page_index,
            page_size: self.page_size,
        };
        EffectiveRequest::new(list, self.filter.clone())
    }

    /// Adopts the state encoded in the address bar, without any page reset.
    pub fn on_navigated(&mut self, query: &str) -> Navigation {
        let snapshot = self.codec.decode(query);
        log::debug!("list state: navigated to `{query}`");

        self.page_index = snapshot.list.page_index;
        self.page_size = snapshot.list.page_size;
        self.sort = SortChange::new(
            snapshot.list.order_by.clone(),
            snapshot.list.order_direction,
        );
        self.filter = snapshot.filter.clone();

        let emitted = self.emit_if_changed();
        Navigation { snapshot, emitted }
    }

    /// Folds one trigger into the state. Returns the request to fetch, if any.
    pub fn dispatch(&mut self, trigger: ListTrigger) -> Option<EffectiveRequest> {
        match trigger {
            ListTrigger::Page {
                page_index,
                page_size,
            } => {
                if page_size == 0 {
                    log::warn!("list state: page size 0 rejected");
                    return None;
                }
                // новый размер страницы делает текущее смещение бессмысленным
                self.page_index = if page_size != self.page_size { 0 } else { page_index };
                self.page_size = page_size;
            }
            ListTrigger::Sort(sort) => {
                if sort == self.sort {
                    log::debug!("list state: duplicate sort `{}` ignored", sort.order_by);
                    return None;
                }
                self.sort = sort;
                self.page_index = 0;
            }
            ListTrigger::Filter(filter) => {
                let filter = filter.stripped();
                if filter == self.filter {
                    log::debug!("list state: filter unchanged");
                    return None;
                }
                self.filter = filter;
                self.page_index = 0;
            }
        }
        self.emit_if_changed()
    }

    fn emit_if_changed(&mut self) -> Option<EffectiveRequest> {
        let candidate = self.current_request();
        if self.last_emitted.as_ref() == Some(&candidate) {
            log::debug!("list state: request unchanged, suppressed");
            return None;
        }

        let query = self.codec.encode(&candidate);
        log::debug!("list state: replace query with `{query}`");
        self.history.replace_query(&query);
        self.last_emitted = Some(candidate.clone());
        Some(candidate)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use contracts::shared::filter::{FilterValue, StubFilterStructure};

    /// Records every replace; the last one is the address bar.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHistory {
        pub writes: Vec<String>,
    }

    impl RecordingHistory {
        pub fn current(&self) -> &str {
            self.writes.last().map(String::as_str).unwrap_or("")
        }
    }

    impl HistoryWriter for RecordingHistory {
        fn replace_query(&mut self, query: &str) {
            self.writes.push(query.to_string());
        }
    }

    pub(crate) fn backlog_codec() -> QueryStringCodec {
        QueryStringCodec::new(
            StubFilterStructure::new()
                .scalar("type")
                .collection("tags")
                .scalar("search"),
            EffectiveRequest::new(
                ListRequest::new(20).sorted_by("number", SortDirection::Desc),
                FilterState::new(),
            ),
        )
    }

    fn controller_at(query: &str) -> ListStateController<RecordingHistory> {
        let mut controller = ListStateController::new(backlog_codec(), RecordingHistory::default());
        controller.on_navigated(query);
        controller
    }

    fn bug_filter() -> FilterState {
        FilterState::new().with("type", FilterValue::scalar("bug"))
    }

    #[test]
    fn test_page_size_change_resets_page_index() {
        let mut controller = controller_at("pageIndex=3&pageSize=20");

        let request = controller
            .dispatch(ListTrigger::Page { page_index: 3, page_size: 50 })
            .unwrap();
        assert_eq!(request.list.page_index, 0);
        assert_eq!(request.list.page_size, 50);
    }

    #[test]
    fn test_page_change_keeps_requested_index() {
        let mut controller = controller_at("");

        let request = controller
            .dispatch(ListTrigger::Page { page_index: 7, page_size: 20 })
            .unwrap();
        assert_eq!(request.list.page_index, 7);
        assert!(controller.history().current().contains("pageIndex=7"));
    }

    #[test]
    fn test_sort_change_resets_page_index() {
        let mut controller = controller_at("pageIndex=4");

        let request = controller
            .dispatch(ListTrigger::Sort(SortChange::new("title", SortDirection::Asc)))
            .unwrap();
        assert_eq!(request.list.page_index, 0);
        assert_eq!(request.list.order_by, "title");
    }

    #[test]
    fn test_duplicate_sort_runs_no_cycle() {
        let mut controller = controller_at("pageIndex=4");
        let writes = controller.history().writes.len();

        let same = SortChange::new("number", SortDirection::Desc);
        assert_eq!(controller.dispatch(ListTrigger::Sort(same)), None);
        assert_eq!(controller.current_request().list.page_index, 4);
        assert_eq!(controller.history().writes.len(), writes);
    }

    #[test]
    fn test_filter_change_resets_page_index() {
        let mut controller = controller_at("pageIndex=2");

        let request = controller.dispatch(ListTrigger::Filter(bug_filter())).unwrap();
        assert_eq!(request.list.page_index, 0);
        assert_eq!(request.filter, bug_filter());
    }

    #[test]
    fn test_identical_trigger_twice_emits_once() {
        let mut controller = controller_at("");
        let writes = controller.history().writes.len();

        for trigger in [
            ListTrigger::Filter(bug_filter()),
            ListTrigger::Page { page_index: 1, page_size: 20 },
            ListTrigger::Sort(SortChange::new("title", SortDirection::Asc)),
        ] {
            assert!(controller.dispatch(trigger.clone()).is_some());
            assert_eq!(controller.dispatch(trigger), None);
        }
        assert_eq!(controller.history().writes.len(), writes + 3);
    }

    #[test]
    fn test_empty_filter_values_do_not_count_as_change() {
        let mut controller = controller_at("type=bug");
        let with_empties = bug_filter()
            .with("tags", FilterValue::List(vec![]))
            .with("search", FilterValue::Null);
        assert_eq!(controller.dispatch(ListTrigger::Filter(with_empties)), None);
    }

    #[test]
    fn test_rewrite_decodes_back_to_the_same_request() {
        let mut controller = controller_at("");
        controller.dispatch(ListTrigger::Filter(bug_filter()));
        controller.dispatch(ListTrigger::Page { page_index: 2, page_size: 20 });

        let written = controller.history().current().to_string();
        let writes = controller.history().writes.len();
        let navigation = controller.on_navigated(&written);

        assert_eq!(navigation.emitted, None);
        assert_eq!(navigation.snapshot, controller.current_request());
        assert_eq!(controller.history().writes.len(), writes);
    }

    #[test]
    fn test_unsorted_link_is_not_replaced_by_the_default_sort() {
        let mut controller = ListStateController::new(backlog_codec(), RecordingHistory::default());
        let first = controller.on_navigated("orderBy=");
        assert_eq!(first.emitted.map(|r| r.list.order_by), Some(String::new()));

        let written = controller.history().current().to_string();
        let navigation = controller.on_navigated(&written);
        assert_eq!(navigation.emitted, None);
        assert_eq!(navigation.snapshot.list.order_by, "");
    }

    #[test]
    fn test_navigation_adopts_deep_link_without_reset() {
        let mut controller = ListStateController::new(backlog_codec(), RecordingHistory::default());
        let navigation = controller.on_navigated("?type=bug&pageIndex=2&pageSize=50&orderBy=title");

        let emitted = navigation.emitted.unwrap();
        assert_eq!(emitted.list.page_index, 2);
        assert_eq!(emitted.list.page_size, 50);
        assert_eq!(emitted.list.order_by, "title");
        assert_eq!(emitted.list.order_direction, SortDirection::Desc);
        assert_eq!(navigation.snapshot.filter, bug_filter());
        // canonical form replaces the pasted link
        assert_eq!(
            controller.history().current(),
            "type=bug&orderBy=title&orderDirection=desc&pageIndex=2&pageSize=50"
        );
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let mut controller = controller_at("pageIndex=1");
        assert_eq!(
            controller.dispatch(ListTrigger::Page { page_index: 0, page_size: 0 }),
            None
        );
        assert_eq!(controller.current_request().list.page_size, 20);
        assert_eq!(controller.current_request().list.page_index, 1);
    }
}
