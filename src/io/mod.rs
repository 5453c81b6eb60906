//! Input/output helpers.
//!
//! - CSV download of a selection and re-reading an export (`export`)

pub mod export;

pub use export::*;
