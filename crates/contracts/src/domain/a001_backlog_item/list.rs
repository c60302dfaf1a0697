//! Filter fields and defaults of the backlog list.

use crate::shared::filter::{FilterState, StubFilterStructure};
use crate::shared::list_request::{EffectiveRequest, ListRequest, SortDirection};

pub const CURRENT_USER_RELATION: &str = "currentUserRelation";
pub const TYPE: &str = "type";
pub const TAGS: &str = "tags";
pub const SEARCH: &str = "search";
pub const ASSIGNED_USER_ID: &str = "assignedUserId";

pub const DEFAULT_ORDER_BY: &str = "number";

/// Sortable columns, in display order
pub const COLUMNS: [(&str, &str); 7] = [
    ("number", "#"),
    ("title", "Title"),
    ("assignee", "Assignee"),
    ("state", "State"),
    ("tags", "Tags"),
    ("created", "Created"),
    ("lastUpdated", "Updated"),
];

pub fn stub_filter_structure() -> StubFilterStructure {
    StubFilterStructure::new()
        .scalar(CURRENT_USER_RELATION)
        .scalar(TYPE)
        .collection(TAGS)
        .scalar(SEARCH)
        .scalar(ASSIGNED_USER_ID)
}

/// Newest items first
pub fn default_request(page_size: u32) -> EffectiveRequest {
    EffectiveRequest::new(
        ListRequest::new(page_size).sorted_by(DEFAULT_ORDER_BY, SortDirection::Desc),
        FilterState::new(),
    )
}
