pub mod factory;
pub mod runner;
pub mod ui;
