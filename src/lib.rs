//! Beijing air-quality dashboard: hourly station readings are loaded once,
//! enriched with calendar attributes, filtered by the side-panel criteria and
//! summarised into the tables the charts draw.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
