use futures::future::{FutureExt, LocalBoxFuture};

use contracts::shared::filter::{FilterState, FilterValue};
use contracts::shared::list_request::EffectiveRequest;

use super::controller::{HistoryWriter, ListStateController, ListTrigger, SortChange};
use super::data_source::{FetchOutcome, ListEndpoint, PageView, PaginatedDataSource};
use super::filter_form::{FilterChange, FilterFormController, FilterSource, SearchTicket};

/// Fetch issued by a reconciliation. The caller drives it on the event loop.
pub type PendingFetch = LocalBoxFuture<'static, FetchOutcome>;

/// One list view: state controller, filter form and data source wired together.
///
/// Every method runs one synchronous handler step and hands back the fetch
/// it started, if any.
pub struct ListSession<T, E, H, F = FilterFormController> {
    controller: ListStateController<H>,
    form: F,
    data_source: PaginatedDataSource<T, E>,
}

impl<T, E, H, F> ListSession<T, E, H, F>
where
    T: Clone + 'static,
    E: ListEndpoint<T> + 'static,
    H: HistoryWriter,
    F: FilterSource,
{
    pub fn new(
        controller: ListStateController<H>,
        form: F,
        data_source: PaginatedDataSource<T, E>,
    ) -> Self {
        Self {
            controller,
            form,
            data_source,
        }
    }

    pub fn controller(&self) -> &ListStateController<H> {
        &self.controller
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn data_source(&self) -> &PaginatedDataSource<T, E> {
        &self.data_source
    }

    pub fn view(&self) -> PageView<T> {
        self.data_source.view()
    }

    /// Address bar changed: initial load, back/forward, pasted link or our own rewrite.
    pub fn navigate(&mut self, query: &str) -> Option<PendingFetch> {
        let navigation = self.controller.on_navigated(query);
        let fetch = navigation.emitted.map(|request| self.submit(request));

        // URL-driven sync of the filter bar; the controller collapses the echo
        let change = self.form.apply_filter(&navigation.snapshot.filter);
        self.apply(change).or(fetch)
    }

    pub fn page(&mut self, page_index: u32, page_size: u32) -> Option<PendingFetch> {
        self.dispatch(ListTrigger::Page {
            page_index,
            page_size,
        })
    }

    pub fn sort(&mut self, sort: SortChange) -> Option<PendingFetch> {
        self.dispatch(ListTrigger::Sort(sort))
    }

    pub fn set_filter(&mut self, values: &FilterState) -> Option<PendingFetch> {
        let change = self.form.apply_filter(values);
        self.apply(change)
    }

    pub fn clear_filters(&mut self) -> Option<PendingFetch> {
        let change = self.form.clear_filter();
        self.apply(change)
    }

    /// Re-fetches the current request; the address bar is left alone.
    pub fn refresh(&mut self) -> PendingFetch {
        self.submit(self.controller.current_request())
    }

    pub fn dismiss_error(&self) {
        self.data_source.dismiss_error();
    }

    fn apply(&mut self, change: FilterChange) -> Option<PendingFetch> {
        self.dispatch(ListTrigger::Filter(change.value))
    }

    fn dispatch(&mut self, trigger: ListTrigger) -> Option<PendingFetch> {
        let request = self.controller.dispatch(trigger)?;
        Some(self.submit(request))
    }

    fn submit(&self, request: EffectiveRequest) -> PendingFetch {
        self.data_source.submit(request).boxed_local()
    }
}

/// Field edits and debounced search of the standard filter form.
impl<T, E, H> ListSession<T, E, H, FilterFormController>
where
    T: Clone + 'static,
    E: ListEndpoint<T> + 'static,
    H: HistoryWriter,
{
    pub fn patch_field(&mut self, name: &str, value: FilterValue) -> Option<PendingFetch> {
        let change = self.form.patch_field(name, value);
        self.apply(change)
    }

    pub fn edit_search(&mut self, text: &str) -> SearchTicket {
        self.form.edit_search(text)
    }

    pub fn search_idle(&mut self, ticket: SearchTicket) -> Option<PendingFetch> {
        let change = self.form.search_idle(ticket)?;
        self.apply(change)
    }
}
