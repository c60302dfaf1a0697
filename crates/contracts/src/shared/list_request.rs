use serde::{Deserialize, Serialize};

use super::filter::FilterState;

/// Query-string keys owned by [`ListRequest`]; every other key is a filter.
pub const PAGE_INDEX_KEY: &str = "pageIndex";
pub const PAGE_SIZE_KEY: &str = "pageSize";
pub const ORDER_BY_KEY: &str = "orderBy";
pub const ORDER_DIRECTION_KEY: &str = "orderDirection";

pub const LIST_REQUEST_KEYS: [&str; 4] = [
    PAGE_INDEX_KEY,
    PAGE_SIZE_KEY,
    ORDER_BY_KEY,
    ORDER_DIRECTION_KEY,
];

/// Направление сортировки
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn code(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn is_ascending(&self) -> bool {
        matches!(self, SortDirection::Asc)
    }
}

/// Paging and sorting part of a list request.
///
/// `page_size` is always positive; constructors and the query-string decoder
/// never produce a zero page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    /// Empty string means "no explicit sort column"
    #[serde(default)]
    pub order_by: String,
    #[serde(default)]
    pub order_direction: SortDirection,
    #[serde(default)]
    pub page_index: u32,
    pub page_size: u32,
}

impl ListRequest {
    pub fn new(page_size: u32) -> Self {
        Self {
            order_by: String::new(),
            order_direction: SortDirection::Asc,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn sorted_by(mut self, order_by: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by = order_by.into();
        self.order_direction = direction;
        self
    }

    pub fn at_page(mut self, page_index: u32) -> Self {
        self.page_index = page_index;
        self
    }
}

/// The canonical snapshot sent to the backend and written to the address bar.
///
/// Equality is structural: sequences compare element by element in order,
/// nested maps by content. `filter` never holds empty values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveRequest {
    pub list: ListRequest,
    pub filter: FilterState,
}

impl EffectiveRequest {
    pub fn new(list: ListRequest, filter: FilterState) -> Self {
        Self {
            list,
            filter: filter.stripped(),
        }
    }
}

/// Ответ списочного endpoint'а
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> ListResponse<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    /// Количество страниц для заданного размера страницы
    pub fn total_pages(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(u64::from(page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_direction_codes() {
        assert_eq!(SortDirection::from_code("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::from_code("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::from_code("DESC"), None);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn test_list_request_never_has_zero_page_size() {
        assert_eq!(ListRequest::new(0).page_size, 1);
    }

    #[test]
    fn test_list_response_wire_format() {
        let response: ListResponse<String> =
            serde_json::from_str(r#"{"items":["a","b"],"totalCount":41}"#).unwrap();
        assert_eq!(response.items, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(response.total_pages(20), 3);
        assert_eq!(ListResponse::<String>::empty().total_pages(20), 0);
    }

    #[test]
    fn test_list_request_serializes_camel_case() {
        let request = ListRequest::new(50).sorted_by("number", SortDirection::Desc);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["orderBy"], "number");
        assert_eq!(json["orderDirection"], "desc");
        assert_eq!(json["pageIndex"], 0);
        assert_eq!(json["pageSize"], 50);
    }
}
