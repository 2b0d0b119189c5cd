pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod models;
pub mod monitor;
pub mod output;
pub mod server;
