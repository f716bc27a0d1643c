pub mod api;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod supervisor;
pub mod ui;
