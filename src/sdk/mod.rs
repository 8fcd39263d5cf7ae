pub mod click;
pub mod config;
pub mod geometry;
pub mod map;
pub mod orchestrator;
pub mod report;
pub mod routing;
pub mod selection;
pub mod session;
pub mod util;
