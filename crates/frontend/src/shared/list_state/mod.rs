//! URL-synchronized list state: filter form, paging/sort reconciliation and
//! the paginated data source behind one list view.

pub mod browser;
pub mod config;
pub mod controller;
pub mod data_source;
pub mod filter_form;
pub mod session;

pub use browser::{current_query, BrowserHistory, HttpListEndpoint};
pub use config::{ConfigError, ListViewConfig};
pub use controller::{HistoryWriter, ListStateController, ListTrigger, Navigation, SortChange};
pub use data_source::{FetchError, FetchOutcome, ListEndpoint, PageView, PaginatedDataSource};
pub use filter_form::{ChangeSource, FilterChange, FilterFormController, FilterSource, SearchTicket};
pub use session::{ListSession, PendingFetch};
