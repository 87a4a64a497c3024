//! Core library for the expedition-tools command line application.
//!
//! The library exposes high-level orchestration helpers that power the
//! command-line interface as well as the integration tests. The modules are
//! structured to keep responsibilities narrow and composable: the sheet
//! loader lives under [`io::sheet`], data representations inside [`model`],
//! the join-and-normalize passes in [`normalize`], and the export
//! orchestration under [`export`].

pub mod error;
pub mod export;
pub mod io;
pub mod model;
pub mod normalize;

pub use error::{ExportError, Result};
