pub mod categories;
pub mod competitions;
pub mod entries;
pub mod judges;
pub mod judging;
pub mod members;
pub mod results;
