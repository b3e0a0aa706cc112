use serde::{Deserialize, Serialize};

use super::bookmark::Bookmark;

/// Requests the bookmarks screen hands to the surrounding browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    OpenUrl { url: String, private: bool },
    CopyUrl { url: String },
    Share { bookmarks: Vec<Bookmark> },
    /// The user wants to move these items; the browser picks the destination.
    MoveRequested { guids: Vec<String> },
    ExitBookmarks,
}
