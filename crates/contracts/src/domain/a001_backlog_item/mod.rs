pub mod dto;
pub mod list;
