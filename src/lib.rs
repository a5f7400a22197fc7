pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod report;
pub mod types;
