pub mod backlog_item_type;
pub mod current_user_relation;

pub use backlog_item_type::BacklogItemType;
pub use current_user_relation::CurrentUserRelation;
