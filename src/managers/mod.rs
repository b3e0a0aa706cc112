// State managers: persistent bookmark storage and the screen store.

pub mod bookmark_manager;
pub mod bookmarks_store;
