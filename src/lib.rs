//! weather-menu: Interactive terminal menu for configuring weather graphs.

pub mod logger;
pub mod registry;
pub mod report;
pub mod tui;
pub mod types;
