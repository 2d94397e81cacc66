//! Rank colleges by a weighted set of criteria.
//!
//! The [`scoring`] module is a pure library: it never touches files or global
//! state. Loading records, configuration and terminal output live in the
//! other modules and are what the `college-rank` binary wires together.

pub mod colleges;
pub mod config;
pub mod logging;
pub mod output;
pub mod scoring;
