pub mod entry_sort;
pub mod judging_session;
pub mod scoring;
