pub mod charts;
pub mod map;
pub mod metrics;
pub mod panels;
