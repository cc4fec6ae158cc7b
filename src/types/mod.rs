pub mod config;
pub mod description;
pub mod report;
