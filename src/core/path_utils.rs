/*
 * This module resolves the tool's fixed filesystem locations: the bookmark
 * archive it reads, the export file it writes, and the directory its log file
 * lives in. There is deliberately no configuration surface; the locations are
 * constants of the tool.
 */
use directories::{ProjectDirs, UserDirs};
use std::fs;
use std::path::PathBuf;

// The bookmark archive, relative to the user's home directory.
pub const BOOKMARKS_RELATIVE_PATH: &str = "Library/Safari/Bookmarks.plist";

// The export file, written into the current working directory.
pub const EXPORT_FILENAME: &str = "bookmarks.json";

pub const LOG_FILENAME: &str = "bookmark_picker.log";

/*
 * Returns the absolute path of the bookmark archive, or `None` when the home
 * directory cannot be determined (in which case there is nothing sensible to
 * open and the caller reports the condition to the user).
 */
pub fn default_bookmarks_path() -> Option<PathBuf> {
    let user_dirs = UserDirs::new();
    if user_dirs.is_none() {
        log::error!("PathUtils: Could not determine the user's home directory.");
    }
    user_dirs.map(|dirs| dirs.home_dir().join(BOOKMARKS_RELATIVE_PATH))
}

pub fn default_export_path() -> PathBuf {
    PathBuf::from(EXPORT_FILENAME)
}

/*
 * Retrieves the application's local configuration directory, creating it if
 * necessary. Only the log file lives there today. Returns `None` when the
 * directory cannot be determined or created; logging then stays disabled
 * rather than failing startup.
 */
pub fn get_base_app_config_local_dir(app_name: &str) -> Option<PathBuf> {
    ProjectDirs::from("", "", app_name).and_then(|proj_dirs| {
        let config_path = proj_dirs.config_local_dir();
        if !config_path.exists() {
            if let Err(e) = fs::create_dir_all(config_path) {
                log::error!(
                    "PathUtils: Failed to create app config directory {config_path:?}: {e}"
                );
                return None;
            }
        }
        Some(config_path.to_path_buf())
    })
}
