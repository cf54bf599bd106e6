pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod report;
pub mod util;
