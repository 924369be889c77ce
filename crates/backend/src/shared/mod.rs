pub mod config;
pub mod data;
pub mod document_store;
pub mod error;
pub mod logging;
pub mod state;
