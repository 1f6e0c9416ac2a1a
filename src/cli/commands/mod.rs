pub mod config;
pub mod delete;
pub mod export;
pub mod get;
pub mod projects;
pub mod put;
