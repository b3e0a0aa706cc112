use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, BookmarkItem, Folder};

/// Full view-state of the bookmarks screen.
///
/// Each optional sub-state represents an overlay screen. They are independent
/// `Option`s because a folder picker may sit on top of an add/edit screen;
/// [`BookmarksState::current_screen`] gives the innermost one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarksState {
    pub current_folder: Folder,
    pub bookmark_items: Vec<BookmarkItem>,
    pub selected_items: Vec<BookmarkItem>,
    pub bookmarks_add_folder_state: Option<BookmarksAddFolderState>,
    pub bookmarks_edit_folder_state: Option<BookmarksEditFolderState>,
    pub bookmarks_edit_bookmark_state: Option<BookmarksEditBookmarkState>,
    pub bookmarks_select_folder_state: Option<BookmarksSelectFolderState>,
    pub bookmarks_snackbar_state: BookmarksSnackbarState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarksAddFolderState {
    pub parent: Folder,
    pub folder_being_added_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarksEditFolderState {
    pub parent: Folder,
    pub folder: Folder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookmarksEditBookmarkState {
    pub bookmark: Bookmark,
    pub folder: Folder,
}

/// Folder picker. `selection_guid` tracks the folder chosen for a bookmark,
/// `folder_selection_guid` the parent chosen for a folder being added or edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookmarksSelectFolderState {
    pub folders: Vec<SelectFolderItem>,
    pub selection_guid: Option<String>,
    pub folder_selection_guid: Option<String>,
}

/// A row of the folder picker. The list may hold the same folder at several depths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectFolderItem {
    pub indentation: u32,
    pub folder: Folder,
}

impl SelectFolderItem {
    pub fn new(indentation: u32, folder: Folder) -> Self {
        Self { indentation, folder }
    }

    pub fn guid(&self) -> &str {
        &self.folder.guid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarksSnackbarState {
    #[default]
    None,
    CantEditDesktopFolders,
    /// Items removed from view but not yet deleted from storage.
    UndoDeletion(BTreeSet<String>),
}

/// Innermost screen currently shown, derived from which sub-states are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarksScreen {
    List,
    EditBookmark,
    EditFolder,
    AddFolder,
    SelectFolder,
}

impl BookmarksState {
    pub fn is_in_selection_mode(&self) -> bool {
        !self.selected_items.is_empty()
    }

    /// Guids staged for deletion by an undo snackbar.
    pub fn pending_deletions(&self) -> Option<&BTreeSet<String>> {
        match &self.bookmarks_snackbar_state {
            BookmarksSnackbarState::UndoDeletion(guids) => Some(guids),
            _ => None,
        }
    }

    /// The list as rendered: everything except items waiting on an undo snackbar.
    pub fn visible_items(&self) -> Vec<&BookmarkItem> {
        match self.pending_deletions() {
            Some(guids) => self
                .bookmark_items
                .iter()
                .filter(|item| !guids.contains(item.guid()))
                .collect(),
            None => self.bookmark_items.iter().collect(),
        }
    }

    pub fn current_screen(&self) -> BookmarksScreen {
        if self.bookmarks_select_folder_state.is_some() {
            BookmarksScreen::SelectFolder
        } else if self.bookmarks_add_folder_state.is_some() {
            BookmarksScreen::AddFolder
        } else if self.bookmarks_edit_folder_state.is_some() {
            BookmarksScreen::EditFolder
        } else if self.bookmarks_edit_bookmark_state.is_some() {
            BookmarksScreen::EditBookmark
        } else {
            BookmarksScreen::List
        }
    }
}
