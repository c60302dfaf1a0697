pub mod a001_backlog_item;
