// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod grid;

pub mod data;
pub mod progress;
pub mod scrape;
pub mod store;
