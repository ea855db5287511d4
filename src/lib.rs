pub mod chart;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod log;
pub mod profile;
pub mod prompt;
pub mod provider;
pub mod render;
pub mod units;
pub mod ux;
pub mod wire;
pub mod wizard;
