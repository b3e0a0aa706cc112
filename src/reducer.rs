//! Pure state transitions for the bookmarks screen.
//!
//! [`bookmarks_reducer`] maps the current [`BookmarksState`] and one
//! [`Action`] to the next state. It never fails: an action that refers to a
//! sub-screen that isn't open leaves the state as it was. Side effects
//! (loading, persisting, opening tabs) belong to the store's middleware.

use crate::types::action::{
    Action, AddFolderAction, BookmarkMenuAction, BookmarksListMenuAction, EditBookmarkAction,
    EditFolderAction, FolderMenuAction, MultiSelectMenuAction, SelectFolderAction, SnackbarAction,
};
use crate::types::bookmark::{BookmarkItem, Folder};
use crate::types::state::{
    BookmarksAddFolderState, BookmarksEditBookmarkState, BookmarksEditFolderState,
    BookmarksSelectFolderState, BookmarksSnackbarState, BookmarksState, SelectFolderItem,
};

/// Applies `action` to `state` and returns the resulting state.
pub fn bookmarks_reducer(state: BookmarksState, action: &Action) -> BookmarksState {
    match action {
        Action::Init => state,
        Action::BookmarksLoaded {
            folder,
            bookmark_items,
        } => BookmarksState {
            current_folder: folder.clone(),
            bookmark_items: bookmark_items.clone(),
            ..state
        },
        Action::AddFolderClicked => BookmarksState {
            bookmarks_add_folder_state: Some(BookmarksAddFolderState {
                parent: state.current_folder.clone(),
                folder_being_added_title: String::new(),
            }),
            ..state
        },
        Action::BookmarkLongClicked(bookmark) => state.toggle_selection_of(bookmark.clone().into()),
        Action::FolderLongClicked(folder) => state.toggle_selection_of(folder.clone().into()),
        Action::BookmarkClicked(bookmark) => {
            if state.is_in_selection_mode() {
                state.toggle_selection_of(bookmark.clone().into())
            } else {
                state
            }
        }
        Action::FolderClicked(folder) => reduce_folder_clicked(state, folder),
        Action::BackClicked => reduce_back_clicked(state),
        Action::DeletionStaged(guids) => {
            let mut pending = state.pending_deletions().cloned().unwrap_or_default();
            pending.extend(guids.iter().cloned());
            BookmarksState {
                bookmarks_snackbar_state: BookmarksSnackbarState::UndoDeletion(pending),
                ..state
            }
        }
        Action::AddFolder(action) => reduce_add_folder(state, action),
        Action::EditFolder(action) => reduce_edit_folder(state, action),
        Action::EditBookmark(action) => reduce_edit_bookmark(state, action),
        Action::SelectFolder(action) => reduce_select_folder(state, action),
        Action::ListMenu(action) => reduce_list_menu(state, action),
        Action::Snackbar(action) => reduce_snackbar(state, *action),
    }
}

fn reduce_folder_clicked(state: BookmarksState, folder: &Folder) -> BookmarksState {
    if !state.is_in_selection_mode() {
        // Opening the folder is a navigation side effect.
        return state;
    }
    if folder.is_desktop_root() {
        return state.cant_edit_desktop_folders();
    }
    state.toggle_selection_of(folder.clone().into())
}

/// Pops one level of sub-screen navigation, innermost first.
fn reduce_back_clicked(mut state: BookmarksState) -> BookmarksState {
    if let Some(select) = state.bookmarks_select_folder_state.as_mut() {
        if select.folder_selection_guid.is_some() {
            select.folder_selection_guid = None;
        } else {
            state.bookmarks_select_folder_state = None;
        }
    } else if state.bookmarks_add_folder_state.is_some() {
        state.bookmarks_add_folder_state = None;
    } else if state.bookmarks_edit_folder_state.is_some() {
        state.bookmarks_edit_folder_state = None;
    } else if state.bookmarks_edit_bookmark_state.is_some() {
        state.bookmarks_edit_bookmark_state = None;
    }
    state
}

fn reduce_add_folder(mut state: BookmarksState, action: &AddFolderAction) -> BookmarksState {
    match action {
        AddFolderAction::TitleChanged(text) => {
            if let Some(add) = state.bookmarks_add_folder_state.as_mut() {
                add.folder_being_added_title = text.clone();
            }
            state
        }
        AddFolderAction::ParentFolderClicked => {
            match state.bookmarks_add_folder_state.as_ref().map(|add| add.parent.guid.clone()) {
                Some(guid) => state.with_select_folder(|select| {
                    select.folder_selection_guid = Some(guid);
                }),
                None => state,
            }
        }
    }
}

fn reduce_edit_folder(mut state: BookmarksState, action: &EditFolderAction) -> BookmarksState {
    match action {
        EditFolderAction::TitleChanged(text) => {
            if let Some(edit) = state.bookmarks_edit_folder_state.as_mut() {
                edit.folder.title = text.clone();
            }
            state
        }
        EditFolderAction::ParentFolderClicked => {
            match state.bookmarks_edit_folder_state.as_ref().map(|edit| edit.parent.guid.clone()) {
                Some(guid) => state.with_select_folder(|select| {
                    select.folder_selection_guid = Some(guid);
                }),
                None => state,
            }
        }
        EditFolderAction::DeleteClicked => BookmarksState {
            bookmarks_edit_folder_state: None,
            ..state
        },
    }
}

fn reduce_edit_bookmark(mut state: BookmarksState, action: &EditBookmarkAction) -> BookmarksState {
    match action {
        EditBookmarkAction::TitleChanged(text) => {
            if let Some(edit) = state.bookmarks_edit_bookmark_state.as_mut() {
                edit.bookmark.title = text.clone();
            }
            state
        }
        EditBookmarkAction::UrlChanged(text) => {
            if let Some(edit) = state.bookmarks_edit_bookmark_state.as_mut() {
                edit.bookmark.url = text.clone();
            }
            state
        }
        EditBookmarkAction::FolderClicked => {
            match state.bookmarks_edit_bookmark_state.as_ref().map(|edit| edit.folder.guid.clone()) {
                Some(guid) => state.with_select_folder(|select| {
                    select.selection_guid = Some(guid);
                }),
                None => state,
            }
        }
        EditBookmarkAction::DeleteClicked => BookmarksState {
            bookmarks_edit_bookmark_state: None,
            ..state
        },
    }
}

fn reduce_select_folder(mut state: BookmarksState, action: &SelectFolderAction) -> BookmarksState {
    match action {
        SelectFolderAction::FoldersLoaded(folders) => {
            if let Some(select) = state.bookmarks_select_folder_state.as_mut() {
                select.folders = folders.clone();
            }
            state
        }
        SelectFolderAction::ItemClicked(item) => state.route_folder_selection(item),
    }
}

fn reduce_list_menu(state: BookmarksState, action: &BookmarksListMenuAction) -> BookmarksState {
    match action {
        BookmarksListMenuAction::Bookmark(BookmarkMenuAction::EditClicked(bookmark)) => {
            BookmarksState {
                bookmarks_edit_bookmark_state: Some(BookmarksEditBookmarkState {
                    bookmark: bookmark.clone(),
                    folder: state.current_folder.clone(),
                }),
                ..state
            }
        }
        BookmarksListMenuAction::Folder(FolderMenuAction::EditClicked(folder)) => {
            if folder.is_reserved_root() {
                return state.cant_edit_desktop_folders();
            }
            BookmarksState {
                bookmarks_edit_folder_state: Some(BookmarksEditFolderState {
                    parent: state.current_folder.clone(),
                    folder: folder.clone(),
                }),
                ..state
            }
        }
        BookmarksListMenuAction::Bookmark(_) | BookmarksListMenuAction::Folder(_) => state,
        BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::EditClicked) => {
            let mut state = state;
            let sole_root = matches!(
                state.selected_items.as_slice(),
                [BookmarkItem::Folder(folder)] if folder.is_reserved_root()
            );
            if sole_root {
                // Selection stays so the user can pick something else.
                return state.cant_edit_desktop_folders();
            }
            let selected = std::mem::take(&mut state.selected_items);
            if let [item] = selected.as_slice() {
                match item {
                    BookmarkItem::Bookmark(bookmark) => {
                        state.bookmarks_edit_bookmark_state = Some(BookmarksEditBookmarkState {
                            bookmark: bookmark.clone(),
                            folder: state.current_folder.clone(),
                        });
                    }
                    BookmarkItem::Folder(folder) => {
                        state.bookmarks_edit_folder_state = Some(BookmarksEditFolderState {
                            parent: state.current_folder.clone(),
                            folder: folder.clone(),
                        });
                    }
                }
            }
            state
        }
        BookmarksListMenuAction::MultiSelect(_) => BookmarksState {
            selected_items: Vec::new(),
            ..state
        },
    }
}

fn reduce_snackbar(state: BookmarksState, action: SnackbarAction) -> BookmarksState {
    match action {
        SnackbarAction::Undo => BookmarksState {
            bookmarks_snackbar_state: BookmarksSnackbarState::None,
            ..state
        },
        SnackbarAction::Dismissed => {
            let mut state = state;
            let dismissed = std::mem::take(&mut state.bookmarks_snackbar_state);
            if let BookmarksSnackbarState::UndoDeletion(guids) = dismissed {
                state.bookmark_items.retain(|item| !guids.contains(item.guid()));
                state.selected_items.retain(|item| !guids.contains(item.guid()));
            }
            state
        }
    }
}

impl BookmarksState {
    fn cant_edit_desktop_folders(self) -> Self {
        BookmarksState {
            bookmarks_snackbar_state: BookmarksSnackbarState::CantEditDesktopFolders,
            ..self
        }
    }

    /// Adds `item` to the selection if absent, removes it if present.
    fn toggle_selection_of(mut self, item: BookmarkItem) -> Self {
        match self.selected_items.iter().position(|selected| *selected == item) {
            Some(index) => {
                self.selected_items.remove(index);
            }
            None => self.selected_items.push(item),
        }
        self
    }

    /// Opens the folder picker if needed and lets `update` adjust it.
    fn with_select_folder(mut self, update: impl FnOnce(&mut BookmarksSelectFolderState)) -> Self {
        let mut select = self.bookmarks_select_folder_state.take().unwrap_or_default();
        update(&mut select);
        self.bookmarks_select_folder_state = Some(select);
        self
    }

    /// Writes a picked folder into the edit context that opened the picker.
    ///
    /// A set `folder_selection_guid` means the parent picker of an add/edit
    /// folder screen is on top; otherwise the pick is a bookmark's folder.
    /// "Desktop Bookmarks" holds only the desktop roots and can't be picked.
    fn route_folder_selection(mut self, item: &SelectFolderItem) -> Self {
        if self.bookmarks_select_folder_state.is_none() {
            return self;
        }
        if item.folder.is_desktop_root() {
            return self.cant_edit_desktop_folders();
        }
        let Some(select) = self.bookmarks_select_folder_state.as_mut() else {
            return self;
        };
        let folder = &item.folder;

        if select.folder_selection_guid.is_some() {
            if let Some(add) = self.bookmarks_add_folder_state.as_mut() {
                add.parent = folder.clone();
                select.folder_selection_guid = Some(folder.guid.clone());
            } else if let Some(edit) = self.bookmarks_edit_folder_state.as_mut() {
                edit.parent = folder.clone();
                select.folder_selection_guid = Some(folder.guid.clone());
            }
        } else if let Some(edit) = self.bookmarks_edit_bookmark_state.as_mut() {
            edit.folder = folder.clone();
            select.selection_guid = Some(folder.guid.clone());
        }
        self
    }
}
