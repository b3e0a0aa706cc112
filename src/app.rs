//! App core for the bookmarks screen.
//!
//! Wires the storage, the store with its middleware, and the settings
//! engine together, and owns the navigation events waiting for the host.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::database::connection::Database;
use crate::managers::bookmark_manager::BookmarkManager;
use crate::managers::bookmarks_store::{BookmarksStore, Middleware};
use crate::services::bookmarks_middleware::{BookmarksMiddleware, NavigationLog};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::action::Action;
use crate::types::errors::AppError;
use crate::types::navigation::NavigationEvent;
use crate::types::state::BookmarksState;

pub struct App {
    pub settings_engine: SettingsEngine,
    pub storage: Rc<RefCell<BookmarkManager>>,
    pub store: BookmarksStore,
    navigation: NavigationLog,
}

impl App {
    /// Opens (or creates) the database at `db_path`.
    ///
    /// Settings should already be loaded: the start folder is read from them.
    pub fn new<P: AsRef<Path>>(db_path: P, settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let db = Database::open(db_path)?;
        Ok(Self::with_database(db, settings_engine))
    }

    pub fn open_in_memory(settings_engine: SettingsEngine) -> Result<Self, AppError> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(db, settings_engine))
    }

    fn with_database(db: Database, settings_engine: SettingsEngine) -> Self {
        let storage = Rc::new(RefCell::new(BookmarkManager::new(db)));
        let navigation = NavigationLog::new();
        let middleware = BookmarksMiddleware::new(
            storage.clone(),
            Box::new(navigation.clone()),
            &settings_engine.get_settings().bookmarks.start_folder,
        );
        let chain: Vec<Box<dyn Middleware>> = vec![Box::new(middleware)];
        let store = BookmarksStore::new(BookmarksState::default(), chain);

        Self {
            settings_engine,
            storage,
            store,
            navigation,
        }
    }

    /// Loads the start folder into the screen.
    pub fn startup(&mut self) {
        tracing::info!("bookmarks screen starting");
        self.store.dispatch(Action::Init);
    }

    /// Reloads the current folder after storage changed behind the store's back.
    pub fn refresh(&mut self) {
        self.store.dispatch(Action::Init);
    }

    pub fn state(&self) -> &BookmarksState {
        self.store.state()
    }

    pub fn drain_navigation(&self) -> Vec<NavigationEvent> {
        self.navigation.drain()
    }
}
