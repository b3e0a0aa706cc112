//! Flow tests for `BookmarksMiddleware` wired into a store over an in-memory database.
//!
//! Each test drives the screen through actions only and then checks the
//! resulting state, what reached storage, and the navigation events emitted.

use std::cell::RefCell;
use std::rc::Rc;

use bookmarks_screen::database::Database;
use bookmarks_screen::managers::bookmark_manager::{BookmarkManager, BookmarksStorage};
use bookmarks_screen::managers::bookmarks_store::{BookmarksStore, Middleware};
use bookmarks_screen::services::bookmarks_middleware::{BookmarksMiddleware, NavigationLog};
use bookmarks_screen::types::action::*;
use bookmarks_screen::types::bookmark::{Bookmark, BookmarkItem, BookmarkRoot, Folder};
use bookmarks_screen::types::navigation::NavigationEvent;
use bookmarks_screen::types::state::{BookmarksScreen, BookmarksSnackbarState, BookmarksState};

struct Harness {
    store: BookmarksStore,
    storage: Rc<RefCell<BookmarkManager>>,
    navigation: NavigationLog,
}

impl Harness {
    fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    fn state(&self) -> &BookmarksState {
        self.store.state()
    }

    fn add_bookmark(&self, parent: &str, url: &str, title: &str) -> Bookmark {
        let guid = self.storage.borrow_mut().add_bookmark(parent, url, title).unwrap();
        Bookmark::new(url, title, "", &guid)
    }

    fn create_folder(&self, parent: &str, title: &str) -> Folder {
        let guid = self.storage.borrow_mut().create_folder(parent, title).unwrap();
        Folder::new(title, &guid)
    }

    fn titles(&self) -> Vec<String> {
        self.state().visible_items().iter().map(|i| i.title().to_string()).collect()
    }
}

fn setup() -> Harness {
    let db = Database::open_in_memory().expect("Failed to open in-memory database");
    let storage = Rc::new(RefCell::new(BookmarkManager::new(db)));
    let navigation = NavigationLog::new();
    let middleware = BookmarksMiddleware::new(
        storage.clone(),
        Box::new(navigation.clone()),
        BookmarkRoot::Mobile.guid(),
    );
    let chain: Vec<Box<dyn Middleware>> = vec![Box::new(middleware)];
    Harness {
        store: BookmarksStore::new(BookmarksState::default(), chain),
        storage,
        navigation,
    }
}

fn mobile() -> &'static str {
    BookmarkRoot::Mobile.guid()
}

// ─── Loading and navigation ───

#[test]
fn test_init_loads_start_folder() {
    let mut h = setup();
    h.add_bookmark(mobile(), "https://a.com", "A");

    h.dispatch(Action::Init);

    assert_eq!(h.state().current_folder.guid, mobile());
    assert_eq!(h.titles(), vec!["A"]);
}

#[test]
fn test_init_reloads_current_folder() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.dispatch(Action::Init);
    h.dispatch(Action::FolderClicked(work.clone()));

    h.add_bookmark(&work.guid, "https://late.com", "Late");
    h.dispatch(Action::Init);

    assert_eq!(h.state().current_folder.guid, work.guid);
    assert_eq!(h.titles(), vec!["Late"]);
}

#[test]
fn test_folder_click_opens_folder_and_back_returns() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.add_bookmark(&work.guid, "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::FolderClicked(work.clone()));
    assert_eq!(h.state().current_folder, work);
    assert_eq!(h.titles(), vec!["A"]);

    h.dispatch(Action::BackClicked);
    assert_eq!(h.state().current_folder.guid, mobile());
    assert!(h.navigation.drain().is_empty());
}

#[test]
fn test_back_at_start_folder_exits() {
    let mut h = setup();
    h.dispatch(Action::Init);

    h.dispatch(Action::BackClicked);

    assert_eq!(h.navigation.drain(), vec![NavigationEvent::ExitBookmarks]);
}

#[test]
fn test_back_through_desktop_folders() {
    let mut h = setup();
    h.add_bookmark(BookmarkRoot::Toolbar.guid(), "https://docs.rs", "docs.rs");
    h.dispatch(Action::Init);
    assert_eq!(h.state().bookmark_items[0], BookmarkItem::from(BookmarkRoot::Root.folder()));

    h.dispatch(Action::FolderClicked(BookmarkRoot::Root.folder()));
    assert_eq!(h.titles(), vec!["Bookmarks Menu", "Bookmarks Toolbar", "Other Bookmarks"]);

    h.dispatch(Action::FolderClicked(BookmarkRoot::Toolbar.folder()));
    assert_eq!(h.titles(), vec!["docs.rs"]);

    h.dispatch(Action::BackClicked);
    assert_eq!(h.state().current_folder.guid, BookmarkRoot::Root.guid());

    h.dispatch(Action::BackClicked);
    assert_eq!(h.state().current_folder.guid, mobile());
}

#[test]
fn test_back_in_selection_mode_stays_in_folder() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    let a = h.add_bookmark(&work.guid, "https://a.com", "A");
    h.dispatch(Action::Init);
    h.dispatch(Action::FolderClicked(work.clone()));
    h.dispatch(Action::BookmarkLongClicked(a));

    h.dispatch(Action::BackClicked);

    assert_eq!(h.state().current_folder, work);
    assert!(h.navigation.drain().is_empty());
}

#[test]
fn test_clicking_missing_folder_keeps_state() {
    let mut h = setup();
    h.dispatch(Action::Init);
    let before = h.state().clone();

    h.dispatch(Action::FolderClicked(Folder::new("Ghost", "ghost")));

    assert_eq!(*h.state(), before);
}

#[test]
fn test_bookmark_click_opens_url() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::BookmarkClicked(a));

    assert_eq!(
        h.navigation.drain(),
        vec![NavigationEvent::OpenUrl { url: "https://a.com".to_string(), private: false }]
    );
}

#[test]
fn test_bookmark_click_in_selection_mode_only_selects() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    let b = h.add_bookmark(mobile(), "https://b.com", "B");
    h.dispatch(Action::Init);
    h.dispatch(Action::BookmarkLongClicked(a));

    h.dispatch(Action::BookmarkClicked(b));

    assert_eq!(h.state().selected_items.len(), 2);
    assert!(h.navigation.drain().is_empty());
}

// ─── Add / edit ───

#[test]
fn test_add_folder_is_created_on_back() {
    let mut h = setup();
    h.dispatch(Action::Init);

    h.dispatch(Action::AddFolderClicked);
    h.dispatch(Action::AddFolder(AddFolderAction::TitleChanged("  Work  ".to_string())));
    h.dispatch(Action::BackClicked);

    assert_eq!(h.state().current_screen(), BookmarksScreen::List);
    assert_eq!(h.titles(), vec!["Work"]);
}

#[test]
fn test_add_folder_with_blank_title_creates_nothing() {
    let mut h = setup();
    h.dispatch(Action::Init);

    h.dispatch(Action::AddFolderClicked);
    h.dispatch(Action::AddFolder(AddFolderAction::TitleChanged("   ".to_string())));
    h.dispatch(Action::BackClicked);

    assert_eq!(h.state().bookmarks_add_folder_state, None);
    assert!(h.storage.borrow().load_folder(mobile()).unwrap().1.is_empty());
}

#[test]
fn test_add_folder_into_picked_parent() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.dispatch(Action::Init);

    h.dispatch(Action::AddFolderClicked);
    h.dispatch(Action::AddFolder(AddFolderAction::TitleChanged("Reports".to_string())));
    h.dispatch(Action::AddFolder(AddFolderAction::ParentFolderClicked));
    let picked = h
        .state()
        .bookmarks_select_folder_state
        .as_ref()
        .and_then(|s| s.folders.iter().find(|f| f.guid() == work.guid).cloned())
        .expect("work folder should be listed");
    h.dispatch(Action::SelectFolder(SelectFolderAction::ItemClicked(picked)));
    h.dispatch(Action::BackClicked);
    h.dispatch(Action::BackClicked);
    h.dispatch(Action::BackClicked);

    let (_, children) = h.storage.borrow().load_folder(&work.guid).unwrap();
    assert_eq!(children.iter().map(|i| i.title()).collect::<Vec<_>>(), vec!["Reports"]);
}

#[test]
fn test_edit_bookmark_persists_title_and_folder() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::EditClicked(a.clone()))));
    h.dispatch(Action::EditBookmark(EditBookmarkAction::TitleChanged("Renamed".to_string())));
    h.dispatch(Action::EditBookmark(EditBookmarkAction::FolderClicked));

    let folders = &h.state().bookmarks_select_folder_state.as_ref().expect("picker open").folders;
    assert_eq!(folders.len(), 2);
    let picked = folders[1].clone();
    assert_eq!(picked.guid(), work.guid);

    h.dispatch(Action::SelectFolder(SelectFolderAction::ItemClicked(picked)));
    h.dispatch(Action::BackClicked);
    assert_eq!(h.state().current_screen(), BookmarksScreen::EditBookmark);
    h.dispatch(Action::BackClicked);

    assert_eq!(h.state().current_screen(), BookmarksScreen::List);
    assert_eq!(h.titles(), vec!["Work"]);
    let moved = h.storage.borrow().bookmarks_in(&work.guid).unwrap();
    assert_eq!(moved, vec![Bookmark::new("https://a.com", "Renamed", "", &a.guid)]);
}

#[test]
fn test_edit_bookmark_keeps_edits_when_desktop_root_is_picked() {
    let mut h = setup();
    h.add_bookmark(BookmarkRoot::Toolbar.guid(), "https://docs.rs", "docs.rs");
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::EditClicked(a.clone()))));
    h.dispatch(Action::EditBookmark(EditBookmarkAction::TitleChanged("Renamed".to_string())));
    h.dispatch(Action::EditBookmark(EditBookmarkAction::FolderClicked));
    let root_row = h
        .state()
        .bookmarks_select_folder_state
        .as_ref()
        .expect("picker open")
        .folders
        .iter()
        .find(|item| item.folder.is_desktop_root())
        .cloned()
        .expect("desktop root listed");

    h.dispatch(Action::SelectFolder(SelectFolderAction::ItemClicked(root_row)));
    assert_eq!(h.state().bookmarks_snackbar_state, BookmarksSnackbarState::CantEditDesktopFolders);
    h.dispatch(Action::BackClicked);
    h.dispatch(Action::BackClicked);

    assert_eq!(h.state().current_screen(), BookmarksScreen::List);
    let saved = h.storage.borrow().bookmarks_in(mobile()).unwrap();
    assert_eq!(saved, vec![Bookmark::new("https://a.com", "Renamed", "", &a.guid)]);
}

#[test]
fn test_edit_folder_picker_excludes_edited_folder() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.create_folder(&work.guid, "Nested");
    let home = h.create_folder(mobile(), "Home");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Folder(FolderMenuAction::EditClicked(work))));
    h.dispatch(Action::EditFolder(EditFolderAction::ParentFolderClicked));

    let guids: Vec<String> = h
        .state()
        .bookmarks_select_folder_state
        .as_ref()
        .expect("picker open")
        .folders
        .iter()
        .map(|f| f.guid().to_string())
        .collect();
    assert_eq!(guids, vec![mobile().to_string(), home.guid]);
}

#[test]
fn test_edit_folder_rename_on_back() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Folder(FolderMenuAction::EditClicked(work))));
    h.dispatch(Action::EditFolder(EditFolderAction::TitleChanged("Office".to_string())));
    h.dispatch(Action::BackClicked);

    assert_eq!(h.titles(), vec!["Office"]);
}

// ─── Deletion ───

#[test]
fn test_multi_select_delete_is_committed_on_dismiss() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.add_bookmark(mobile(), "https://b.com", "B");
    h.dispatch(Action::Init);

    h.dispatch(Action::BookmarkLongClicked(a.clone()));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::DeleteClicked)));

    assert!(h.state().selected_items.is_empty());
    assert_eq!(h.titles(), vec!["B"]);
    assert_eq!(h.storage.borrow().bookmarks_in(mobile()).unwrap().len(), 2);

    h.dispatch(Action::Snackbar(SnackbarAction::Dismissed));

    assert_eq!(h.state().bookmarks_snackbar_state, BookmarksSnackbarState::None);
    assert_eq!(h.state().bookmark_items.len(), 1);
    let remaining = h.storage.borrow().bookmarks_in(mobile()).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].guid, a.guid);
}

#[test]
fn test_undo_discards_staged_deletion() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::DeleteClicked(a))));
    assert!(h.titles().is_empty());

    h.dispatch(Action::Snackbar(SnackbarAction::Undo));
    h.dispatch(Action::Snackbar(SnackbarAction::Dismissed));

    assert_eq!(h.titles(), vec!["A"]);
    assert_eq!(h.storage.borrow().bookmarks_in(mobile()).unwrap().len(), 1);
}

#[test]
fn test_successive_deletions_share_one_snackbar() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    let work = h.create_folder(mobile(), "Work");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::DeleteClicked(a))));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Folder(FolderMenuAction::DeleteClicked(work))));

    assert_eq!(h.state().pending_deletions().map(|p| p.len()), Some(2));
    h.dispatch(Action::Snackbar(SnackbarAction::Dismissed));
    assert!(h.storage.borrow().load_folder(mobile()).unwrap().1.is_empty());
}

#[test]
fn test_roots_are_never_staged_for_deletion() {
    let mut h = setup();
    h.add_bookmark(BookmarkRoot::Toolbar.guid(), "https://docs.rs", "docs.rs");
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);
    h.dispatch(Action::FolderClicked(BookmarkRoot::Root.folder()));

    h.dispatch(Action::FolderLongClicked(BookmarkRoot::Toolbar.folder()));
    h.dispatch(Action::BookmarkLongClicked(a.clone()));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::DeleteClicked)));

    assert_eq!(
        h.state().bookmarks_snackbar_state,
        BookmarksSnackbarState::UndoDeletion([a.guid.clone()].into_iter().collect())
    );
    h.dispatch(Action::Snackbar(SnackbarAction::Dismissed));

    assert_eq!(h.titles(), vec!["Bookmarks Menu", "Bookmarks Toolbar", "Other Bookmarks"]);
    let (_, stored) = h.storage.borrow().load_folder(BookmarkRoot::Root.guid()).unwrap();
    assert_eq!(stored, h.state().bookmark_items);
    assert!(h.storage.borrow().bookmarks_in(mobile()).unwrap().is_empty());
}

#[test]
fn test_deleting_a_root_from_its_menu_stages_nothing() {
    let mut h = setup();
    h.dispatch(Action::Init);
    h.dispatch(Action::FolderClicked(BookmarkRoot::Root.folder()));

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Folder(FolderMenuAction::DeleteClicked(
        BookmarkRoot::Unfiled.folder(),
    ))));

    assert_eq!(h.state().bookmarks_snackbar_state, BookmarksSnackbarState::None);
    assert_eq!(h.titles(), vec!["Bookmarks Menu", "Bookmarks Toolbar", "Other Bookmarks"]);
}

#[test]
fn test_delete_from_edit_bookmark_screen() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::EditClicked(a.clone()))));
    h.dispatch(Action::EditBookmark(EditBookmarkAction::DeleteClicked));

    assert_eq!(h.state().current_screen(), BookmarksScreen::List);
    assert_eq!(
        h.state().bookmarks_snackbar_state,
        BookmarksSnackbarState::UndoDeletion([a.guid].into_iter().collect())
    );
}

// ─── Menus ───

#[test]
fn test_bookmark_menu_side_effects() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::CopyClicked(a.clone()))));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(BookmarkMenuAction::ShareClicked(a.clone()))));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(
        BookmarkMenuAction::OpenInPrivateTabClicked(a.clone()),
    )));

    assert_eq!(
        h.navigation.drain(),
        vec![
            NavigationEvent::CopyUrl { url: "https://a.com".to_string() },
            NavigationEvent::Share { bookmarks: vec![a] },
            NavigationEvent::OpenUrl { url: "https://a.com".to_string(), private: true },
        ]
    );
}

#[test]
fn test_folder_menu_opens_all_bookmarks() {
    let mut h = setup();
    let work = h.create_folder(mobile(), "Work");
    h.add_bookmark(&work.guid, "https://a.com", "A");
    h.create_folder(&work.guid, "Nested");
    h.add_bookmark(&work.guid, "https://b.com", "B");
    h.dispatch(Action::Init);

    h.dispatch(Action::ListMenu(BookmarksListMenuAction::Folder(
        FolderMenuAction::OpenAllInNormalTabClicked(work),
    )));

    assert_eq!(
        h.navigation.drain(),
        vec![
            NavigationEvent::OpenUrl { url: "https://a.com".to_string(), private: false },
            NavigationEvent::OpenUrl { url: "https://b.com".to_string(), private: false },
        ]
    );
}

#[test]
fn test_multi_select_menu_side_effects() {
    let mut h = setup();
    let a = h.add_bookmark(mobile(), "https://a.com", "A");
    let work = h.create_folder(mobile(), "Work");
    h.add_bookmark(&work.guid, "https://w.com", "W");
    h.dispatch(Action::Init);

    h.dispatch(Action::BookmarkLongClicked(a.clone()));
    h.dispatch(Action::FolderLongClicked(work.clone()));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(
        MultiSelectMenuAction::OpenInPrivateTabsClicked,
    )));
    assert!(h.state().selected_items.is_empty());

    h.dispatch(Action::BookmarkLongClicked(a.clone()));
    h.dispatch(Action::FolderLongClicked(work.clone()));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::MoveClicked)));

    h.dispatch(Action::BookmarkLongClicked(a.clone()));
    h.dispatch(Action::FolderLongClicked(work.clone()));
    h.dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::ShareClicked)));

    assert_eq!(
        h.navigation.drain(),
        vec![
            NavigationEvent::OpenUrl { url: "https://a.com".to_string(), private: true },
            NavigationEvent::OpenUrl { url: "https://w.com".to_string(), private: true },
            NavigationEvent::MoveRequested { guids: vec![a.guid.clone(), work.guid] },
            NavigationEvent::Share { bookmarks: vec![a] },
        ]
    );
}
