//! `galvan-dashboard` library crate.
//!
//! The binary (`galvan`) is a thin wrapper around this library so that:
//!
//! - the dataset, KPI and export logic is testable without a terminal
//! - the CLI and the TUI share one selection pipeline
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod tui;
