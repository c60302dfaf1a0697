pub mod filter;
pub mod list_request;
pub mod query_string;
