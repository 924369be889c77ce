pub mod repository;
pub mod view_counts;
