// Platform paths for the bookmarks screen
// Selects the config and data directories for Windows, macOS and Linux
// at compile time via `cfg(target_os)`.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory holding `settings.json`.
///
/// - **Linux**: `~/.config/bookmarks` (or `$XDG_CONFIG_HOME/bookmarks`)
/// - **macOS**: `~/Library/Preferences/Bookmarks`
/// - **Windows**: `%APPDATA%/Bookmarks/config`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
}

/// Directory holding the bookmarks database.
///
/// - **Linux**: `~/.local/share/bookmarks` (or `$XDG_DATA_HOME/bookmarks`)
/// - **macOS**: `~/Library/Application Support/Bookmarks`
/// - **Windows**: `%APPDATA%/Bookmarks/data`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_data_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_data_dir()
    }
}
