//! Side effects of the bookmarks screen.
//!
//! `BookmarksMiddleware` sits in front of the reducer. It reads the state
//! as it was before each action, talks to the storage and navigation
//! collaborators, and feeds results back as new actions
//! (`BookmarksLoaded`, `FoldersLoaded`, `DeletionStaged`). Collaborator
//! failures are logged and dropped so dispatch never fails.

use std::cell::RefCell;
use std::rc::Rc;

use crate::managers::bookmark_manager::BookmarksStorage;
use crate::managers::bookmarks_store::{Dispatcher, Middleware};
use crate::types::action::{
    Action, AddFolderAction, BookmarkMenuAction, BookmarksListMenuAction, EditBookmarkAction,
    EditFolderAction, FolderMenuAction, MultiSelectMenuAction, SelectFolderAction, SnackbarAction,
};
use crate::types::bookmark::{Bookmark, BookmarkItem, BookmarkRoot};
use crate::types::navigation::NavigationEvent;
use crate::types::state::BookmarksState;

/// Receives requests that leave the bookmarks screen (tabs, clipboard, share sheet).
pub trait NavigationHandler {
    fn navigate(&mut self, event: NavigationEvent);
}

/// Navigation handler that queues events until the host drains them.
#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    events: Rc<RefCell<Vec<NavigationEvent>>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every event recorded so far, oldest first.
    pub fn drain(&self) -> Vec<NavigationEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl NavigationHandler for NavigationLog {
    fn navigate(&mut self, event: NavigationEvent) {
        tracing::debug!(event = ?event, "navigation requested");
        self.events.borrow_mut().push(event);
    }
}

/// Storage shared between the middleware and the host.
pub type SharedStorage = Rc<RefCell<dyn BookmarksStorage>>;

pub struct BookmarksMiddleware {
    storage: SharedStorage,
    navigation: Box<dyn NavigationHandler>,
    start_folder: String,
}

impl BookmarksMiddleware {
    pub fn new(storage: SharedStorage, navigation: Box<dyn NavigationHandler>, start_folder: &str) -> Self {
        Self {
            storage,
            navigation,
            start_folder: start_folder.to_string(),
        }
    }

    fn load_folder(&self, guid: &str, dispatcher: &mut Dispatcher) {
        match self.storage.borrow().load_folder(guid) {
            Ok((folder, bookmark_items)) => dispatcher.dispatch(Action::BookmarksLoaded {
                folder,
                bookmark_items,
            }),
            Err(e) => tracing::warn!(guid, error = %e, "failed to load folder"),
        }
    }

    fn load_folder_tree(&self, exclude: Option<&str>, dispatcher: &mut Dispatcher) {
        match self.storage.borrow().folder_tree(exclude) {
            Ok(folders) => {
                dispatcher.dispatch(Action::SelectFolder(SelectFolderAction::FoldersLoaded(folders)))
            }
            Err(e) => tracing::warn!(error = %e, "failed to load folder tree"),
        }
    }

    fn open_bookmark(&mut self, bookmark: &Bookmark, private: bool) {
        self.navigation.navigate(NavigationEvent::OpenUrl {
            url: bookmark.url.clone(),
            private,
        });
    }

    /// Opens every bookmark directly inside the folder.
    fn open_folder(&mut self, guid: &str, private: bool) {
        let bookmarks = match self.storage.borrow().bookmarks_in(guid) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!(guid, error = %e, "failed to list folder for opening");
                return;
            }
        };
        for bookmark in &bookmarks {
            self.open_bookmark(bookmark, private);
        }
    }

    fn open_selection(&mut self, state: &BookmarksState, private: bool) {
        for item in &state.selected_items {
            match item {
                BookmarkItem::Bookmark(bookmark) => self.open_bookmark(bookmark, private),
                BookmarkItem::Folder(folder) => self.open_folder(&folder.guid, private),
            }
        }
    }

    /// Hides items behind the undo snackbar; storage is touched on dismissal.
    fn stage_deletion<'a>(&self, guids: impl IntoIterator<Item = &'a str>, dispatcher: &mut Dispatcher) {
        let guids: std::collections::BTreeSet<String> = guids
            .into_iter()
            .filter(|guid| BookmarkRoot::from_guid(guid).is_none())
            .map(str::to_string)
            .collect();
        if !guids.is_empty() {
            dispatcher.dispatch(Action::DeletionStaged(guids));
        }
    }

    fn commit_deletion(&self, state: &BookmarksState) {
        let Some(guids) = state.pending_deletions() else {
            return;
        };
        let guids: Vec<String> = guids.iter().cloned().collect();
        if let Err(e) = self.storage.borrow_mut().delete_items(&guids) {
            tracing::warn!(error = %e, "failed to delete bookmarks");
        }
    }

    /// Persists whatever sub-screen back is about to close, or walks up the tree.
    fn handle_back(&mut self, state: &BookmarksState, dispatcher: &mut Dispatcher) {
        if state.bookmarks_select_folder_state.is_some() {
            return;
        }

        let saved = if let Some(add) = &state.bookmarks_add_folder_state {
            let title = add.folder_being_added_title.trim();
            if title.is_empty() {
                return;
            }
            self.storage
                .borrow_mut()
                .create_folder(&add.parent.guid, title)
                .map(|_| ())
        } else if let Some(edit) = &state.bookmarks_edit_folder_state {
            if edit.folder.title.trim().is_empty() {
                return;
            }
            self.storage
                .borrow_mut()
                .update_folder(&edit.folder.guid, edit.folder.title.trim(), &edit.parent.guid)
        } else if let Some(edit) = &state.bookmarks_edit_bookmark_state {
            self.storage.borrow_mut().update_bookmark(
                &edit.bookmark.guid,
                &edit.bookmark.title,
                &edit.bookmark.url,
                &edit.folder.guid,
            )
        } else {
            self.navigate_up(state, dispatcher);
            return;
        };

        match saved {
            Ok(()) => self.load_folder(&state.current_folder.guid, dispatcher),
            Err(e) => tracing::warn!(error = %e, "failed to save bookmark changes"),
        }
    }

    fn navigate_up(&mut self, state: &BookmarksState, dispatcher: &mut Dispatcher) {
        if state.is_in_selection_mode() {
            return;
        }
        let current = state.current_folder.guid.as_str();
        if current.is_empty() || current == BookmarkRoot::Mobile.guid() {
            self.navigation.navigate(NavigationEvent::ExitBookmarks);
            return;
        }
        if current == BookmarkRoot::Root.guid() {
            self.load_folder(BookmarkRoot::Mobile.guid(), dispatcher);
            return;
        }

        let parent = self.storage.borrow().parent_of(current);
        match parent {
            Ok(Some(parent)) => self.load_folder(&parent.guid, dispatcher),
            Ok(None) => self.navigation.navigate(NavigationEvent::ExitBookmarks),
            Err(e) => {
                tracing::warn!(guid = current, error = %e, "failed to find parent folder");
                self.navigation.navigate(NavigationEvent::ExitBookmarks);
            }
        }
    }

    fn handle_menu(&mut self, state: &BookmarksState, action: &BookmarksListMenuAction, dispatcher: &mut Dispatcher) {
        match action {
            BookmarksListMenuAction::Bookmark(action) => match action {
                BookmarkMenuAction::EditClicked(_) => {}
                BookmarkMenuAction::CopyClicked(bookmark) => {
                    self.navigation.navigate(NavigationEvent::CopyUrl {
                        url: bookmark.url.clone(),
                    })
                }
                BookmarkMenuAction::ShareClicked(bookmark) => {
                    self.navigation.navigate(NavigationEvent::Share {
                        bookmarks: vec![bookmark.clone()],
                    })
                }
                BookmarkMenuAction::OpenInNormalTabClicked(bookmark) => self.open_bookmark(bookmark, false),
                BookmarkMenuAction::OpenInPrivateTabClicked(bookmark) => self.open_bookmark(bookmark, true),
                BookmarkMenuAction::DeleteClicked(bookmark) => {
                    self.stage_deletion([bookmark.guid.as_str()], dispatcher)
                }
            },
            BookmarksListMenuAction::Folder(action) => match action {
                FolderMenuAction::EditClicked(_) => {}
                FolderMenuAction::OpenAllInNormalTabClicked(folder) => self.open_folder(&folder.guid, false),
                FolderMenuAction::OpenAllInPrivateTabClicked(folder) => self.open_folder(&folder.guid, true),
                FolderMenuAction::DeleteClicked(folder) => {
                    self.stage_deletion([folder.guid.as_str()], dispatcher)
                }
            },
            BookmarksListMenuAction::MultiSelect(action) => match action {
                MultiSelectMenuAction::EditClicked => {}
                MultiSelectMenuAction::MoveClicked => {
                    let guids = state
                        .selected_items
                        .iter()
                        .map(|item| item.guid().to_string())
                        .collect();
                    self.navigation.navigate(NavigationEvent::MoveRequested { guids });
                }
                MultiSelectMenuAction::DeleteClicked => self.stage_deletion(
                    state.selected_items.iter().map(BookmarkItem::guid),
                    dispatcher,
                ),
                MultiSelectMenuAction::OpenInNormalTabsClicked => self.open_selection(state, false),
                MultiSelectMenuAction::OpenInPrivateTabsClicked => self.open_selection(state, true),
                MultiSelectMenuAction::ShareClicked => {
                    let bookmarks = state
                        .selected_items
                        .iter()
                        .filter_map(|item| match item {
                            BookmarkItem::Bookmark(bookmark) => Some(bookmark.clone()),
                            BookmarkItem::Folder(_) => None,
                        })
                        .collect();
                    self.navigation.navigate(NavigationEvent::Share { bookmarks });
                }
            },
        }
    }
}

impl Middleware for BookmarksMiddleware {
    fn process(&mut self, state: &BookmarksState, action: &Action, dispatcher: &mut Dispatcher) {
        match action {
            Action::Init => {
                let guid = if state.current_folder.guid.is_empty() {
                    self.start_folder.clone()
                } else {
                    state.current_folder.guid.clone()
                };
                self.load_folder(&guid, dispatcher);
            }
            Action::FolderClicked(folder) if !state.is_in_selection_mode() => {
                self.load_folder(&folder.guid, dispatcher)
            }
            Action::BookmarkClicked(bookmark) if !state.is_in_selection_mode() => {
                self.open_bookmark(bookmark, false)
            }
            Action::AddFolder(AddFolderAction::ParentFolderClicked) => {
                if state.bookmarks_add_folder_state.is_some() {
                    self.load_folder_tree(None, dispatcher);
                }
            }
            Action::EditFolder(EditFolderAction::ParentFolderClicked) => {
                if let Some(edit) = &state.bookmarks_edit_folder_state {
                    // A folder can't be moved below itself.
                    self.load_folder_tree(Some(&edit.folder.guid), dispatcher);
                }
            }
            Action::EditBookmark(EditBookmarkAction::FolderClicked) => {
                if state.bookmarks_edit_bookmark_state.is_some() {
                    self.load_folder_tree(None, dispatcher);
                }
            }
            Action::EditFolder(EditFolderAction::DeleteClicked) => {
                if let Some(edit) = &state.bookmarks_edit_folder_state {
                    self.stage_deletion([edit.folder.guid.as_str()], dispatcher);
                }
            }
            Action::EditBookmark(EditBookmarkAction::DeleteClicked) => {
                if let Some(edit) = &state.bookmarks_edit_bookmark_state {
                    self.stage_deletion([edit.bookmark.guid.as_str()], dispatcher);
                }
            }
            Action::BackClicked => self.handle_back(state, dispatcher),
            Action::ListMenu(menu) => self.handle_menu(state, menu, dispatcher),
            Action::Snackbar(SnackbarAction::Dismissed) => self.commit_deletion(state),
            _ => {}
        }
    }
}
