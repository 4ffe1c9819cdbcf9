pub mod analytics;
pub mod config;
pub mod fetch;
pub mod models;
pub mod navigation;
pub mod output;
pub mod parser;
