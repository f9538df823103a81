pub mod page;
pub mod sizing;
