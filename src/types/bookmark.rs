use serde::{Deserialize, Serialize};

/// A saved bookmark as shown in the bookmarks list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    pub url: String,
    pub title: String,
    pub preview_image_url: String,
    pub guid: String,
}

impl Bookmark {
    pub fn new(url: &str, title: &str, preview_image_url: &str, guid: &str) -> Self {
        Self {
            url: url.to_string(),
            title: title.to_string(),
            preview_image_url: preview_image_url.to_string(),
            guid: guid.to_string(),
        }
    }
}

/// A bookmark folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Folder {
    pub title: String,
    pub guid: String,
}

impl Folder {
    pub fn new(title: &str, guid: &str) -> Self {
        Self {
            title: title.to_string(),
            guid: guid.to_string(),
        }
    }

    /// True for the "Desktop Bookmarks" root, which can't be edited or selected for edit.
    pub fn is_desktop_root(&self) -> bool {
        self.guid == BookmarkRoot::Root.guid()
    }

    /// True for any of the five well-known roots. Storage refuses to rename,
    /// move or delete them.
    pub fn is_reserved_root(&self) -> bool {
        BookmarkRoot::from_guid(&self.guid).is_some()
    }
}

/// An entry in the bookmarks list. Equality is by value of the whole item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookmarkItem {
    Bookmark(Bookmark),
    Folder(Folder),
}

impl BookmarkItem {
    pub fn guid(&self) -> &str {
        match self {
            BookmarkItem::Bookmark(b) => &b.guid,
            BookmarkItem::Folder(f) => &f.guid,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            BookmarkItem::Bookmark(b) => &b.title,
            BookmarkItem::Folder(f) => &f.title,
        }
    }
}

impl From<Bookmark> for BookmarkItem {
    fn from(bookmark: Bookmark) -> Self {
        BookmarkItem::Bookmark(bookmark)
    }
}

impl From<Folder> for BookmarkItem {
    fn from(folder: Folder) -> Self {
        BookmarkItem::Folder(folder)
    }
}

/// Well-known root folders of the bookmarks tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkRoot {
    /// Top of the tree; shown to users as "Desktop Bookmarks".
    Root,
    Menu,
    Toolbar,
    Unfiled,
    /// Where bookmarks made on this device live. The default start folder.
    Mobile,
}

impl BookmarkRoot {
    pub const ALL: [BookmarkRoot; 5] = [
        BookmarkRoot::Root,
        BookmarkRoot::Mobile,
        BookmarkRoot::Menu,
        BookmarkRoot::Toolbar,
        BookmarkRoot::Unfiled,
    ];

    /// Roots synced from desktop browsers, children of [`BookmarkRoot::Root`].
    pub const DESKTOP: [BookmarkRoot; 3] =
        [BookmarkRoot::Menu, BookmarkRoot::Toolbar, BookmarkRoot::Unfiled];

    pub fn guid(&self) -> &'static str {
        match self {
            BookmarkRoot::Root => "root________",
            BookmarkRoot::Menu => "menu________",
            BookmarkRoot::Toolbar => "toolbar_____",
            BookmarkRoot::Unfiled => "unfiled_____",
            BookmarkRoot::Mobile => "mobile______",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BookmarkRoot::Root => "Desktop Bookmarks",
            BookmarkRoot::Menu => "Bookmarks Menu",
            BookmarkRoot::Toolbar => "Bookmarks Toolbar",
            BookmarkRoot::Unfiled => "Other Bookmarks",
            BookmarkRoot::Mobile => "Bookmarks",
        }
    }

    pub fn from_guid(guid: &str) -> Option<BookmarkRoot> {
        Self::ALL.iter().copied().find(|root| root.guid() == guid)
    }

    pub fn folder(&self) -> Folder {
        Folder::new(self.title(), self.guid())
    }
}
