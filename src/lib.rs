//! Core library for the zvuk-tools command line application.
//!
//! The library turns free-text sound-engineer credits into a controlled
//! vocabulary of canonical names and re-maps source tables onto it. Name
//! normalization and canonical selection live under [`zvuk::tools::canonical`],
//! the export views in [`zvuk::tools::export`], table adapters under
//! [`zvuk::tools::io`], shared data representations inside
//! [`zvuk::tools::model`], and the file-to-file workflows under
//! [`zvuk::tools::sync`].

pub mod zvuk;

pub use zvuk::tools::{Result, ToolError, canonical, error, export, io, model, sync};
