//! Bookmarks screen core: state, reducer, storage and side effects of a
//! browser's bookmark manager screen.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod reducer;
pub mod rpc_handler;
pub mod services;
pub mod types;
