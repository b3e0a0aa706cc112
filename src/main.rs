//! Bookmarks screen console demo.
//!
//! Drives the screen through an in-memory database: browsing, multi-select,
//! staged deletion with undo, and the folder picker.

use std::error::Error;

use bookmarks_screen::app::App;
use bookmarks_screen::managers::bookmark_manager::BookmarksStorage;
use bookmarks_screen::services::settings_engine::SettingsEngine;
use bookmarks_screen::types::action::{
    Action, BookmarkMenuAction, BookmarksListMenuAction, EditBookmarkAction, MultiSelectMenuAction, SelectFolderAction,
    SnackbarAction,
};
use bookmarks_screen::types::bookmark::{BookmarkItem, BookmarkRoot};
use bookmarks_screen::types::state::BookmarksSnackbarState;

fn main() -> Result<(), Box<dyn Error>> {
    bookmarks_screen::logging::init("bookmarks_screen=warn");

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Bookmarks Screen v{} — Demo Mode                ║", env!("CARGO_PKG_VERSION"));
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let settings = SettingsEngine::new(Some(std::env::temp_dir().join("bookmarks_demo_settings.json")));
    let mut app = App::open_in_memory(settings)?;

    demo_seed(&mut app)?;
    demo_browse(&mut app);
    demo_multi_select(&mut app);
    demo_edit_bookmark(&mut app);

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ Bookmarks screen walkthrough finished");
    println!("═══════════════════════════════════════════════════════════════");
    Ok(())
}

fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

fn print_listing(app: &App) {
    let state = app.state();
    println!("  Folder: {} ({})", state.current_folder.title, state.current_folder.guid);
    for item in state.visible_items() {
        let marker = if state.selected_items.contains(item) { "[x]" } else { "[ ]" };
        match item {
            BookmarkItem::Bookmark(b) => println!("    {} 🔖 {} <{}>", marker, b.title, b.url),
            BookmarkItem::Folder(f) => println!("    {} 📁 {}", marker, f.title),
        }
    }
}

fn demo_seed(app: &mut App) -> Result<(), Box<dyn Error>> {
    section("Storage");
    let mobile = BookmarkRoot::Mobile.guid();
    let mut storage = app.storage.borrow_mut();
    storage.add_bookmark(mobile, "https://www.rust-lang.org", "Rust")?;
    storage.add_bookmark(mobile, "https://crates.io", "crates.io")?;
    let reading = storage.create_folder(mobile, "Reading")?;
    storage.add_bookmark(&reading, "https://doc.rust-lang.org/book/", "The Book")?;
    storage.add_bookmark(BookmarkRoot::Toolbar.guid(), "https://docs.rs", "docs.rs")?;
    println!("  Seeded 4 bookmarks and 1 folder");
    println!("  ✓ BookmarkManager OK");
    println!();
    Ok(())
}

fn demo_browse(app: &mut App) {
    section("Browsing");
    app.startup();
    print_listing(app);

    let reading = app.state().visible_items().into_iter().find_map(|item| match item {
        BookmarkItem::Folder(f) if !f.is_desktop_root() => Some(f.clone()),
        _ => None,
    });
    if let Some(folder) = reading {
        app.store.dispatch(Action::FolderClicked(folder));
        print_listing(app);
        app.store.dispatch(Action::BackClicked);
        println!("  Back to: {}", app.state().current_folder.title);
    }
    println!("  ✓ Navigation OK");
    println!();
}

fn demo_multi_select(app: &mut App) {
    section("Multi-select and undo");
    let bookmarks: Vec<_> = app
        .state()
        .bookmark_items
        .iter()
        .filter_map(|item| match item {
            BookmarkItem::Bookmark(b) => Some(b.clone()),
            BookmarkItem::Folder(_) => None,
        })
        .collect();
    for bookmark in &bookmarks {
        app.store.dispatch(Action::BookmarkLongClicked(bookmark.clone()));
    }
    println!("  Selected {} items", app.state().selected_items.len());

    app.store
        .dispatch(Action::ListMenu(BookmarksListMenuAction::MultiSelect(MultiSelectMenuAction::DeleteClicked)));
    if let BookmarksSnackbarState::UndoDeletion(guids) = &app.state().bookmarks_snackbar_state {
        println!("  Pending deletion of {} items", guids.len());
    }
    print_listing(app);

    app.store.dispatch(Action::Snackbar(SnackbarAction::Undo));
    println!("  Undo: {} items visible again", app.state().visible_items().len());
    println!("  ✓ Staged deletion OK");
    println!();
}

fn demo_edit_bookmark(app: &mut App) {
    section("Edit bookmark");
    let Some(bookmark) = app.state().bookmark_items.iter().find_map(|item| match item {
        BookmarkItem::Bookmark(b) => Some(b.clone()),
        BookmarkItem::Folder(_) => None,
    }) else {
        return;
    };

    app.store.dispatch(Action::ListMenu(BookmarksListMenuAction::Bookmark(
        BookmarkMenuAction::EditClicked(bookmark),
    )));
    app.store.dispatch(Action::EditBookmark(EditBookmarkAction::TitleChanged("Rust home".to_string())));
    app.store.dispatch(Action::EditBookmark(EditBookmarkAction::FolderClicked));
    println!("  Screen: {:?}", app.state().current_screen());

    let target = app
        .state()
        .bookmarks_select_folder_state
        .as_ref()
        .and_then(|picker| picker.folders.iter().find(|f| f.folder.title == "Reading").cloned());
    if let Some(target) = target {
        app.store.dispatch(Action::SelectFolder(SelectFolderAction::ItemClicked(target)));
    }
    app.store.dispatch(Action::BackClicked);
    app.store.dispatch(Action::BackClicked);
    println!("  Screen: {:?}", app.state().current_screen());
    print_listing(app);

    for event in app.drain_navigation() {
        println!("  Navigation: {:?}", event);
    }
    println!("  ✓ Edit flow OK");
    println!();
}
