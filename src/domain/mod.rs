//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - the dataset row (`SalesRecord`) and its ordered month label (`Month`)
//! - the tracked price locations (`Location`)
//! - headline metrics (`Kpis`) and front-end configuration (`DashboardConfig`)

pub mod types;

pub use types::*;
