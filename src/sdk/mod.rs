pub mod config;
pub mod planner;
pub mod routing;
pub mod util;
pub mod view;
