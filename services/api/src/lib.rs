//! Parlance API Library Crate
//!
//! This library contains all the logic for the Parlance web service: the
//! application state, API handlers, view models, and routing. The binaries
//! under `bin/` are thin wrappers around this library.

pub mod config;
pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
