//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`info`] - Describe an overlay file
//! - [`resolve`] - Print the request URL for a tile
//! - [`fetch`] - Load a tile and optionally save it

pub mod common;
pub mod fetch;
pub mod info;
pub mod resolve;
