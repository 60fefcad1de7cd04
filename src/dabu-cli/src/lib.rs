//! Command-line front end for the dabu assembly store reader
//!
//! Shared by the `dabu` tool and the single-purpose `list-assemblies` and
//! `filter-third-party` programs.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
