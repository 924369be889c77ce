pub mod d400_summary;
pub mod d401_analytics;
