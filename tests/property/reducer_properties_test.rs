//! Property-based tests for `bookmarks_reducer`.
//!
//! States are generated with arbitrary lists, selections, sub-screens and
//! snackbars so the laws below are checked far beyond the hand-written cases.

use std::collections::BTreeSet;

use proptest::prelude::*;

use bookmarks_screen::reducer::bookmarks_reducer;
use bookmarks_screen::types::action::{Action, SnackbarAction};
use bookmarks_screen::types::bookmark::{Bookmark, BookmarkItem, Folder};
use bookmarks_screen::types::state::{
    BookmarksAddFolderState, BookmarksSelectFolderState, BookmarksSnackbarState, BookmarksState,
};

fn arb_guid() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,12}"
}

fn arb_folder() -> impl Strategy<Value = Folder> {
    ("[A-Za-z ]{0,12}", arb_guid()).prop_map(|(title, guid)| Folder::new(&title, &guid))
}

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    ("https://[a-z]{3,10}\\.com", "[A-Za-z ]{0,12}", arb_guid())
        .prop_map(|(url, title, guid)| Bookmark::new(&url, &title, "", &guid))
}

fn arb_item() -> impl Strategy<Value = BookmarkItem> {
    prop_oneof![
        arb_bookmark().prop_map(BookmarkItem::from),
        arb_folder().prop_map(BookmarkItem::from),
    ]
}

fn arb_snackbar() -> impl Strategy<Value = BookmarksSnackbarState> {
    prop_oneof![
        Just(BookmarksSnackbarState::None),
        Just(BookmarksSnackbarState::CantEditDesktopFolders),
        proptest::collection::btree_set(arb_guid(), 0..4).prop_map(BookmarksSnackbarState::UndoDeletion),
    ]
}

/// Arbitrary list state. The selection holds distinct items taken from the list.
fn arb_state() -> impl Strategy<Value = BookmarksState> {
    (
        arb_folder(),
        proptest::collection::vec(arb_item(), 0..8),
        any::<u8>(),
        proptest::option::of(arb_folder()),
        any::<bool>(),
        arb_snackbar(),
    )
        .prop_map(|(current_folder, items, mask, add_parent, picker, snackbar)| {
            let mut selected_items: Vec<BookmarkItem> = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if mask & (1 << i) != 0 && !selected_items.contains(item) {
                    selected_items.push(item.clone());
                }
            }
            BookmarksState {
                current_folder,
                bookmark_items: items,
                selected_items,
                bookmarks_add_folder_state: add_parent.map(|parent| BookmarksAddFolderState {
                    parent,
                    folder_being_added_title: String::new(),
                }),
                bookmarks_select_folder_state: picker.then(BookmarksSelectFolderState::default),
                bookmarks_snackbar_state: snackbar,
                ..Default::default()
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn init_is_identity(state in arb_state()) {
        prop_assert_eq!(bookmarks_reducer(state.clone(), &Action::Init), state);
    }

    #[test]
    fn long_click_twice_restores_selection(state in arb_state(), item in arb_item()) {
        let action = match &item {
            BookmarkItem::Bookmark(b) => Action::BookmarkLongClicked(b.clone()),
            BookmarkItem::Folder(f) => Action::FolderLongClicked(f.clone()),
        };
        let was_selected = state.selected_items.contains(&item);

        let once = bookmarks_reducer(state.clone(), &action);
        prop_assert_eq!(once.selected_items.contains(&item), !was_selected);
        prop_assert_eq!(once.selected_items.iter().filter(|s| **s == item).count(), usize::from(!was_selected));

        let twice = bookmarks_reducer(once, &action);
        let before: BTreeSet<String> = state.selected_items.iter().map(|i| i.guid().to_string()).collect();
        let after: BTreeSet<String> = twice.selected_items.iter().map(|i| i.guid().to_string()).collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(twice.selected_items.len(), state.selected_items.len());
    }

    #[test]
    fn bookmark_click_twice_in_selection_mode_restores_state(
        state in arb_state().prop_filter("selection mode", |s| !s.selected_items.is_empty()),
        bookmark in arb_bookmark(),
    ) {
        let action = Action::BookmarkClicked(bookmark.clone());
        let item = BookmarkItem::from(bookmark);
        let once = bookmarks_reducer(state.clone(), &action);
        // Deselecting the last item leaves selection mode, after which a click opens instead.
        prop_assume!(once.is_in_selection_mode());

        let twice = bookmarks_reducer(once, &action);
        prop_assert_eq!(twice.selected_items.contains(&item), state.selected_items.contains(&item));
        prop_assert_eq!(twice.selected_items.len(), state.selected_items.len());
    }

    #[test]
    fn back_never_touches_list_fields(state in arb_state()) {
        let result = bookmarks_reducer(state.clone(), &Action::BackClicked);
        prop_assert_eq!(&result.current_folder, &state.current_folder);
        prop_assert_eq!(&result.bookmark_items, &state.bookmark_items);
        prop_assert_eq!(&result.selected_items, &state.selected_items);
        prop_assert_eq!(&result.bookmarks_snackbar_state, &state.bookmarks_snackbar_state);
    }

    #[test]
    fn dismissing_undo_removes_exactly_pending_items(state in arb_state()) {
        let pending = state.pending_deletions().cloned().unwrap_or_default();
        let result = bookmarks_reducer(state.clone(), &Action::Snackbar(SnackbarAction::Dismissed));

        prop_assert_eq!(&result.bookmarks_snackbar_state, &BookmarksSnackbarState::None);
        prop_assert!(result.bookmark_items.iter().all(|item| !pending.contains(item.guid())));
        let kept = state.bookmark_items.iter().filter(|item| !pending.contains(item.guid())).count();
        prop_assert_eq!(result.bookmark_items.len(), kept);
    }

    #[test]
    fn undo_keeps_every_item(state in arb_state()) {
        let result = bookmarks_reducer(state.clone(), &Action::Snackbar(SnackbarAction::Undo));
        prop_assert_eq!(&result.bookmark_items, &state.bookmark_items);
        prop_assert_eq!(&result.bookmarks_snackbar_state, &BookmarksSnackbarState::None);
    }
}

#[test]
fn back_on_default_state_is_identity() {
    let state = BookmarksState::default();
    assert_eq!(bookmarks_reducer(state.clone(), &Action::BackClicked), state);
}
