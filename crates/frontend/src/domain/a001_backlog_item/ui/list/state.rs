use contracts::domain::a001_backlog_item::dto::BacklogItemListItemDto;
use contracts::domain::a001_backlog_item::list::{default_request, stub_filter_structure, SEARCH};
use contracts::shared::query_string::QueryStringCodec;

use crate::shared::api_utils::api_url;
use crate::shared::list_state::{
    BrowserHistory, FilterFormController, HttpListEndpoint, ListSession, ListStateController,
    ListViewConfig, PaginatedDataSource,
};

pub type BacklogEndpoint = HttpListEndpoint<BacklogItemListItemDto>;
pub type BacklogSession = ListSession<BacklogItemListItemDto, BacklogEndpoint, BrowserHistory>;

/// Настройки списка бэклога; всё, что не указано, берётся из значений по умолчанию
pub const VIEW_CONFIG: &str = r#"
endpoint = "/api/backlog-items"
page_size = 20
"#;

pub fn create_codec(config: &ListViewConfig) -> QueryStringCodec {
    QueryStringCodec::new(stub_filter_structure(), default_request(config.page_size))
}

pub fn create_session(config: &ListViewConfig) -> BacklogSession {
    let form = FilterFormController::new(stub_filter_structure()).with_search_field(SEARCH);
    let endpoint = HttpListEndpoint::new(api_url(config.api_base.as_deref(), &config.endpoint));
    ListSession::new(
        ListStateController::new(create_codec(config), BrowserHistory),
        form,
        PaginatedDataSource::new(endpoint),
    )
}
