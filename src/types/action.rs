//! User intents and collaborator results dispatched to the bookmarks store.
//!
//! Serialized as snake_case, externally tagged JSON so hosts can send them
//! over the RPC channel, e.g. `"back_clicked"` or
//! `{"add_folder": {"title_changed": "Work"}}`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::bookmark::{Bookmark, BookmarkItem, Folder};
use super::state::SelectFolderItem;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Init,
    BookmarksLoaded {
        folder: Folder,
        bookmark_items: Vec<BookmarkItem>,
    },
    AddFolderClicked,
    BookmarkClicked(Bookmark),
    FolderClicked(Folder),
    BookmarkLongClicked(Bookmark),
    FolderLongClicked(Folder),
    BackClicked,
    /// Items were deleted from the list and wait on the undo snackbar.
    DeletionStaged(BTreeSet<String>),
    AddFolder(AddFolderAction),
    EditFolder(EditFolderAction),
    EditBookmark(EditBookmarkAction),
    SelectFolder(SelectFolderAction),
    ListMenu(BookmarksListMenuAction),
    Snackbar(SnackbarAction),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddFolderAction {
    TitleChanged(String),
    ParentFolderClicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditFolderAction {
    TitleChanged(String),
    ParentFolderClicked,
    DeleteClicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditBookmarkAction {
    TitleChanged(String),
    UrlChanged(String),
    FolderClicked,
    DeleteClicked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectFolderAction {
    FoldersLoaded(Vec<SelectFolderItem>),
    ItemClicked(SelectFolderItem),
}

/// Overflow-menu entries of the bookmarks list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarksListMenuAction {
    Bookmark(BookmarkMenuAction),
    Folder(FolderMenuAction),
    MultiSelect(MultiSelectMenuAction),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkMenuAction {
    EditClicked(Bookmark),
    CopyClicked(Bookmark),
    ShareClicked(Bookmark),
    OpenInNormalTabClicked(Bookmark),
    OpenInPrivateTabClicked(Bookmark),
    DeleteClicked(Bookmark),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FolderMenuAction {
    EditClicked(Folder),
    OpenAllInNormalTabClicked(Folder),
    OpenAllInPrivateTabClicked(Folder),
    DeleteClicked(Folder),
}

/// Menu shown while items are selected. Each entry ends selection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiSelectMenuAction {
    EditClicked,
    MoveClicked,
    DeleteClicked,
    OpenInNormalTabsClicked,
    OpenInPrivateTabsClicked,
    ShareClicked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnackbarAction {
    Undo,
    Dismissed,
}
