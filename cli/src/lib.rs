//! bonnet-cli library - 暴露模块用于单元测试

pub mod app;
pub mod commands;
pub mod logging;
