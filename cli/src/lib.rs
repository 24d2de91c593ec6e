//! Command-line front end for `tmac-core`.
//!
//! Parses arguments, calls the API client and renders results as text
//! tables or JSON export files. Fetch failures are reported to the user and
//! are not process failures.

pub mod cli;
pub mod commands;
pub mod export;
pub mod render;
