pub mod args;
pub mod command;
pub mod config;
pub mod context;
pub mod display;
