// Shared type definitions for the bookmarks screen.
// The data model, the action set, navigation events, settings and errors.

pub mod action;
pub mod bookmark;
pub mod errors;
pub mod navigation;
pub mod settings;
pub mod state;
