pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod estimation;
pub mod state;
