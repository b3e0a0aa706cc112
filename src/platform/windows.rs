// Windows paths live under %APPDATA%.

use std::env;
use std::path::PathBuf;

fn app_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("Bookmarks")
}

/// `%APPDATA%/Bookmarks/config`
pub fn get_config_dir() -> PathBuf {
    app_dir().join("config")
}

/// `%APPDATA%/Bookmarks/data`
pub fn get_data_dir() -> PathBuf {
    app_dir().join("data")
}
