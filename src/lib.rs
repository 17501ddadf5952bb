// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;

pub mod csv;
pub mod faculty;
pub mod margin;
pub mod progress;
pub mod ready;
pub mod scrape;
pub mod store;
pub mod table;
pub mod telemetry;
