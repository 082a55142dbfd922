pub mod category;
pub mod competition;
pub mod entry;
pub mod judge;
pub mod judging;
pub mod member;
pub mod result;
