//! Bookmark storage for the bookmarks screen.
//!
//! Implements `BookmarksStorage`, the collaborator that loads folder
//! contents and folder trees for the store and persists edits, moves and
//! deletions, backed by SQLite via `rusqlite`.

use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use crate::database::Database;
use crate::types::bookmark::{Bookmark, BookmarkItem, BookmarkRoot, Folder};
use crate::types::errors::StorageError;
use crate::types::state::SelectFolderItem;

/// Trait defining the storage operations the bookmarks screen relies on.
pub trait BookmarksStorage {
    /// Returns a folder and its children, interleaved by position.
    fn load_folder(&self, guid: &str) -> Result<(Folder, Vec<BookmarkItem>), StorageError>;
    /// Flattened folder hierarchy for the folder picker. The subtree rooted at
    /// `exclude` is left out.
    fn folder_tree(&self, exclude: Option<&str>) -> Result<Vec<SelectFolderItem>, StorageError>;
    /// Parent folder of a bookmark or folder; `None` at the top of the tree.
    fn parent_of(&self, guid: &str) -> Result<Option<Folder>, StorageError>;
    /// Bookmarks directly inside a folder.
    fn bookmarks_in(&self, folder_guid: &str) -> Result<Vec<Bookmark>, StorageError>;
    fn add_bookmark(&mut self, parent_guid: &str, url: &str, title: &str) -> Result<String, StorageError>;
    fn create_folder(&mut self, parent_guid: &str, title: &str) -> Result<String, StorageError>;
    fn update_bookmark(&mut self, guid: &str, title: &str, url: &str, parent_guid: &str) -> Result<(), StorageError>;
    fn update_folder(&mut self, guid: &str, title: &str, parent_guid: &str) -> Result<(), StorageError>;
    fn move_items(&mut self, guids: &[String], parent_guid: &str) -> Result<(), StorageError>;
    /// Deletes bookmarks and folders (with their contents). Guids that no
    /// longer exist are skipped. Returns how many of `guids` were removed.
    fn delete_items(&mut self, guids: &[String]) -> Result<usize, StorageError>;
}

/// Bookmark storage backed by a SQLite database.
pub struct BookmarkManager {
    db: Database,
}

impl BookmarkManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn conn(&self) -> &Connection {
        self.db.connection()
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Next free position under `parent`, shared by folders and bookmarks.
    fn next_position(&self, parent: &str) -> Result<i64, StorageError> {
        let pos = self.conn().query_row(
            "SELECT COALESCE(MAX(position), -1) + 1 FROM ( \
                 SELECT position FROM bookmark_folders WHERE parent_id = ?1 \
                 UNION ALL \
                 SELECT position FROM bookmarks WHERE folder_id = ?1)",
            params![parent],
            |row| row.get(0),
        )?;
        Ok(pos)
    }

    fn find_folder(&self, guid: &str) -> Result<Option<Folder>, StorageError> {
        let folder = self
            .conn()
            .query_row(
                "SELECT id, title FROM bookmark_folders WHERE id = ?1",
                params![guid],
                |row| {
                    Ok(Folder {
                        guid: row.get(0)?,
                        title: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(folder)
    }

    fn require_folder(&self, guid: &str) -> Result<Folder, StorageError> {
        self.find_folder(guid)?
            .ok_or_else(|| StorageError::FolderNotFound(guid.to_string()))
    }

    /// Like `require_folder`, but also rejects the top-level root, which only
    /// holds the other roots.
    fn require_writable_parent(&self, guid: &str) -> Result<Folder, StorageError> {
        if guid == BookmarkRoot::Root.guid() {
            return Err(StorageError::ReadOnlyRoot(guid.to_string()));
        }
        self.require_folder(guid)
    }

    /// Current folder of a bookmark, `None` if no such bookmark exists.
    fn bookmark_parent(&self, guid: &str) -> Result<Option<String>, StorageError> {
        let parent = self
            .conn()
            .query_row(
                "SELECT folder_id FROM bookmarks WHERE id = ?1",
                params![guid],
                |row| row.get(0),
            )
            .optional()?;
        Ok(parent)
    }

    /// Parent id of a folder. Outer `None`: no such folder; inner `None`: top of the tree.
    fn folder_parent(&self, guid: &str) -> Result<Option<Option<String>>, StorageError> {
        let parent = self
            .conn()
            .query_row(
                "SELECT parent_id FROM bookmark_folders WHERE id = ?1",
                params![guid],
                |row| row.get(0),
            )
            .optional()?;
        Ok(parent)
    }

    fn child_folders(&self, parent: &str) -> Result<Vec<Folder>, StorageError> {
        let mut stmt = self.conn().prepare(
            "SELECT id, title FROM bookmark_folders WHERE parent_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![parent], |row| {
            Ok(Folder {
                guid: row.get(0)?,
                title: row.get(1)?,
            })
        })?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Reads a single `Bookmark` row into a struct.
    fn row_to_bookmark(row: &rusqlite::Row) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            guid: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            preview_image_url: row.get(3)?,
        })
    }

    /// Folders and bookmarks directly under `parent`, merged by position.
    fn children(&self, parent: &str) -> Result<Vec<BookmarkItem>, StorageError> {
        let mut positioned: Vec<(i64, BookmarkItem)> = Vec::new();

        let mut stmt = self.conn().prepare(
            "SELECT id, title, position FROM bookmark_folders WHERE parent_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![parent], |row| {
            Ok((
                row.get::<_, i64>(2)?,
                BookmarkItem::Folder(Folder {
                    guid: row.get(0)?,
                    title: row.get(1)?,
                }),
            ))
        })?;
        for row in rows {
            positioned.push(row?);
        }

        let mut stmt = self.conn().prepare(
            "SELECT id, url, title, preview_image_url, position FROM bookmarks \
             WHERE folder_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![parent], |row| {
            Ok((row.get::<_, i64>(4)?, BookmarkItem::Bookmark(Self::row_to_bookmark(row)?)))
        })?;
        for row in rows {
            positioned.push(row?);
        }

        // Stable sort keeps folders ahead of bookmarks on equal positions.
        positioned.sort_by_key(|(position, _)| *position);
        Ok(positioned.into_iter().map(|(_, item)| item).collect())
    }

    /// True when any desktop root holds a bookmark or folder.
    fn has_desktop_content(&self) -> Result<bool, StorageError> {
        let desktop = BookmarkRoot::DESKTOP;
        let count: i64 = self.conn().query_row(
            "SELECT \
                 (SELECT COUNT(*) FROM bookmark_folders WHERE parent_id IN (?1, ?2, ?3)) + \
                 (SELECT COUNT(*) FROM bookmarks WHERE folder_id IN (?1, ?2, ?3))",
            params![desktop[0].guid(), desktop[1].guid(), desktop[2].guid()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Whether `guid` sits somewhere below `ancestor`.
    fn is_descendant(&self, guid: &str, ancestor: &str) -> Result<bool, StorageError> {
        let mut current = self.folder_parent(guid)?.flatten();
        while let Some(id) = current {
            if id == ancestor {
                return Ok(true);
            }
            current = self.folder_parent(&id)?.flatten();
        }
        Ok(false)
    }

    /// Folder ids of the subtree rooted at `guid`, parents before children.
    fn collect_subtree(&self, guid: &str, out: &mut Vec<String>) -> Result<(), StorageError> {
        out.push(guid.to_string());
        for child in self.child_folders(guid)? {
            self.collect_subtree(&child.guid, out)?;
        }
        Ok(())
    }

    fn append_tree(
        &self,
        folder: Folder,
        depth: u32,
        exclude: Option<&str>,
        out: &mut Vec<SelectFolderItem>,
    ) -> Result<(), StorageError> {
        if exclude == Some(folder.guid.as_str()) {
            return Ok(());
        }
        let children = self.child_folders(&folder.guid)?;
        out.push(SelectFolderItem::new(depth, folder));
        for child in children {
            self.append_tree(child, depth + 1, exclude, out)?;
        }
        Ok(())
    }

    /// Re-parents a folder after checking it won't end up inside itself.
    fn reparent_folder(&self, guid: &str, parent_guid: &str, now: i64) -> Result<(), StorageError> {
        if BookmarkRoot::from_guid(guid).is_some() {
            return Err(StorageError::ReadOnlyRoot(guid.to_string()));
        }
        let current = self
            .folder_parent(guid)?
            .ok_or_else(|| StorageError::NotFound(guid.to_string()))?;
        if current.as_deref() == Some(parent_guid) {
            return Ok(());
        }
        if guid == parent_guid || self.is_descendant(parent_guid, guid)? {
            return Err(StorageError::InvalidMove {
                folder: guid.to_string(),
                target: parent_guid.to_string(),
            });
        }
        let position = self.next_position(parent_guid)?;
        self.conn().execute(
            "UPDATE bookmark_folders SET parent_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
            params![parent_guid, position, now, guid],
        )?;
        Ok(())
    }

    fn reparent_bookmark(&self, guid: &str, parent_guid: &str, now: i64) -> Result<(), StorageError> {
        let current = self
            .bookmark_parent(guid)?
            .ok_or_else(|| StorageError::NotFound(guid.to_string()))?;
        if current == parent_guid {
            return Ok(());
        }
        let position = self.next_position(parent_guid)?;
        self.conn().execute(
            "UPDATE bookmarks SET folder_id = ?1, position = ?2, updated_at = ?3 WHERE id = ?4",
            params![parent_guid, position, now, guid],
        )?;
        Ok(())
    }
}

impl BookmarksStorage for BookmarkManager {
    fn load_folder(&self, guid: &str) -> Result<(Folder, Vec<BookmarkItem>), StorageError> {
        let folder = self.require_folder(guid)?;
        let mut items = self.children(guid)?;

        if guid == BookmarkRoot::Root.guid() {
            // The mobile root is shown at the top level, not inside desktop bookmarks.
            items.retain(|item| item.guid() != BookmarkRoot::Mobile.guid());
        } else if guid == BookmarkRoot::Mobile.guid() && self.has_desktop_content()? {
            items.insert(0, BookmarkRoot::Root.folder().into());
        }
        Ok((folder, items))
    }

    fn folder_tree(&self, exclude: Option<&str>) -> Result<Vec<SelectFolderItem>, StorageError> {
        let mut out = Vec::new();
        let mobile = self.require_folder(BookmarkRoot::Mobile.guid())?;
        self.append_tree(mobile, 0, exclude, &mut out)?;

        if self.has_desktop_content()? {
            out.push(SelectFolderItem::new(0, BookmarkRoot::Root.folder()));
            for root in BookmarkRoot::DESKTOP {
                let folder = self.require_folder(root.guid())?;
                self.append_tree(folder, 1, exclude, &mut out)?;
            }
        }
        Ok(out)
    }

    fn parent_of(&self, guid: &str) -> Result<Option<Folder>, StorageError> {
        let parent_id = match self.folder_parent(guid)? {
            Some(parent) => parent,
            None => Some(
                self.bookmark_parent(guid)?
                    .ok_or_else(|| StorageError::NotFound(guid.to_string()))?,
            ),
        };
        match parent_id {
            Some(id) => Ok(Some(self.require_folder(&id)?)),
            None => Ok(None),
        }
    }

    fn bookmarks_in(&self, folder_guid: &str) -> Result<Vec<Bookmark>, StorageError> {
        self.require_folder(folder_guid)?;
        let mut stmt = self.conn().prepare(
            "SELECT id, url, title, preview_image_url FROM bookmarks \
             WHERE folder_id = ?1 ORDER BY position",
        )?;
        let rows = stmt.query_map(params![folder_guid], Self::row_to_bookmark)?;
        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }

    /// Adds a new bookmark. Returns the generated guid.
    fn add_bookmark(&mut self, parent_guid: &str, url: &str, title: &str) -> Result<String, StorageError> {
        self.require_writable_parent(parent_guid)?;

        let guid = Uuid::new_v4().to_string();
        let now = Self::now();
        let position = self.next_position(parent_guid)?;

        self.conn().execute(
            "INSERT INTO bookmarks (id, url, title, preview_image_url, folder_id, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, '', ?4, ?5, ?6, ?6)",
            params![guid, url, title, parent_guid, position, now],
        )?;
        tracing::info!(guid = %guid, parent = parent_guid, "bookmark added");
        Ok(guid)
    }

    /// Creates a new folder. Returns the generated guid.
    fn create_folder(&mut self, parent_guid: &str, title: &str) -> Result<String, StorageError> {
        self.require_writable_parent(parent_guid)?;

        let guid = Uuid::new_v4().to_string();
        let now = Self::now();
        let position = self.next_position(parent_guid)?;

        self.conn().execute(
            "INSERT INTO bookmark_folders (id, title, parent_id, position, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![guid, title, parent_guid, position, now],
        )?;
        tracing::info!(guid = %guid, parent = parent_guid, "folder created");
        Ok(guid)
    }

    fn update_bookmark(&mut self, guid: &str, title: &str, url: &str, parent_guid: &str) -> Result<(), StorageError> {
        self.require_writable_parent(parent_guid)?;
        let now = Self::now();

        let tx = self.conn().unchecked_transaction()?;
        self.reparent_bookmark(guid, parent_guid, now)?;
        self.conn().execute(
            "UPDATE bookmarks SET title = ?1, url = ?2, updated_at = ?3 WHERE id = ?4",
            params![title, url, now, guid],
        )?;
        tx.commit()?;

        tracing::info!(guid, "bookmark updated");
        Ok(())
    }

    fn update_folder(&mut self, guid: &str, title: &str, parent_guid: &str) -> Result<(), StorageError> {
        self.require_writable_parent(parent_guid)?;
        let now = Self::now();

        let tx = self.conn().unchecked_transaction()?;
        self.reparent_folder(guid, parent_guid, now)?;
        self.conn().execute(
            "UPDATE bookmark_folders SET title = ?1, updated_at = ?2 WHERE id = ?3",
            params![title, now, guid],
        )?;
        tx.commit()?;

        tracing::info!(guid, "folder updated");
        Ok(())
    }

    fn move_items(&mut self, guids: &[String], parent_guid: &str) -> Result<(), StorageError> {
        self.require_writable_parent(parent_guid)?;
        let now = Self::now();

        let tx = self.conn().unchecked_transaction()?;
        for guid in guids {
            if self.bookmark_parent(guid)?.is_some() {
                self.reparent_bookmark(guid, parent_guid, now)?;
            } else {
                self.reparent_folder(guid, parent_guid, now)?;
            }
        }
        tx.commit()?;

        tracing::info!(count = guids.len(), parent = parent_guid, "items moved");
        Ok(())
    }

    fn delete_items(&mut self, guids: &[String]) -> Result<usize, StorageError> {
        if let Some(root) = guids.iter().find(|guid| BookmarkRoot::from_guid(guid).is_some()) {
            return Err(StorageError::ReadOnlyRoot(root.clone()));
        }

        let tx = self.conn().unchecked_transaction()?;
        let mut removed = 0;
        for guid in guids {
            if self.bookmark_parent(guid)?.is_some() {
                self.conn()
                    .execute("DELETE FROM bookmarks WHERE id = ?1", params![guid])?;
                removed += 1;
            } else if self.folder_parent(guid)?.is_some() {
                let mut subtree = Vec::new();
                self.collect_subtree(guid, &mut subtree)?;
                // Children first so no row ever points at a deleted parent.
                for id in subtree.iter().rev() {
                    self.conn()
                        .execute("DELETE FROM bookmarks WHERE folder_id = ?1", params![id])?;
                    self.conn()
                        .execute("DELETE FROM bookmark_folders WHERE id = ?1", params![id])?;
                }
                removed += 1;
            } else {
                tracing::debug!(guid = %guid, "item already gone, skipping delete");
            }
        }
        tx.commit()?;

        tracing::info!(removed, "items deleted");
        Ok(removed)
    }
}
