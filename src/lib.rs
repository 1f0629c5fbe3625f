pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod keymap;
pub mod render;
pub mod repo;
pub mod series;
pub mod session;
pub mod types;
pub mod ui;
