use plist::Value;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/*
 * This module provides access to the bookmark archive on disk. It defines
 * errors specific to reading and decoding the archive, a trait
 * `BookmarkSourceOperations` for abstracting the decode step, and a concrete
 * implementation `CoreBookmarkSource` built on the `plist` crate. The property
 * list format itself (binary or XML) is entirely the crate's concern; this
 * module only hands the nested value structure onward to the tree builder.
 */

/*
 * Defines error types for reading the bookmark archive. Access denial is kept
 * distinct from other I/O failures because it is the one condition surfaced to
 * the user as a dedicated notification rather than a generic read error.
 */
#[derive(Debug)]
pub enum SourceError {
    AccessDenied(PathBuf),
    Io(io::Error),
    Malformed(plist::Error),
}

impl From<io::Error> for SourceError {
    fn from(err: io::Error) -> Self {
        SourceError::Io(err)
    }
}

impl From<plist::Error> for SourceError {
    fn from(err: plist::Error) -> Self {
        SourceError::Malformed(err)
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::AccessDenied(p) => {
                write!(f, "Insufficient permission to read bookmarks at {p:?}")
            }
            SourceError::Io(e) => write!(f, "I/O error reading bookmarks: {e}"),
            SourceError::Malformed(e) => write!(f, "Could not decode bookmark archive: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(e) => Some(e),
            SourceError::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;

/*
 * Defines the operations for loading a bookmark archive. Implementations
 * decode the file at `source_path` and return the top-level list of bookmark
 * nodes as generic plist values, ready for the tree builder. The trait exists
 * so application logic can be tested against canned value lists and injected
 * failures without a real archive on disk.
 */
pub trait BookmarkSourceOperations: Send + Sync {
    fn load_root_children(&self, source_path: &Path) -> Result<Vec<Value>>;
}

// The concrete decoder over the `plist` crate.
pub struct CoreBookmarkSource {}

impl CoreBookmarkSource {
    pub fn new() -> Self {
        CoreBookmarkSource {}
    }
}

impl Default for CoreBookmarkSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BookmarkSourceOperations for CoreBookmarkSource {
    /*
     * Opens and decodes the archive, returning the root dictionary's
     * `Children` array. A root that is not a dictionary, or has no `Children`
     * key, yields an empty list rather than an error; there is nothing to
     * show, but nothing went wrong either. Permission failures are mapped to
     * `AccessDenied` so the caller can notify the user specifically.
     */
    fn load_root_children(&self, source_path: &Path) -> Result<Vec<Value>> {
        log::debug!("BookmarkSource: Decoding archive at {source_path:?}");
        let file = File::open(source_path).map_err(|e| {
            if e.kind() == io::ErrorKind::PermissionDenied {
                SourceError::AccessDenied(source_path.to_path_buf())
            } else {
                SourceError::Io(e)
            }
        })?;

        let root = Value::from_reader(BufReader::new(file))?;
        let children = root
            .as_dictionary()
            .and_then(|dict| dict.get("Children"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if children.is_empty() {
            log::warn!("BookmarkSource: Archive at {source_path:?} has no top-level children.");
        } else {
            log::debug!(
                "BookmarkSource: Decoded {} top-level entries from {source_path:?}.",
                children.len()
            );
        }
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::Dictionary;
    use tempfile::tempdir;

    fn write_archive(path: &Path, root: &Value) {
        let file = File::create(path).unwrap();
        root.to_writer_xml(file).unwrap();
    }

    fn link_dict(title: &str, url: &str) -> Value {
        let mut dict = Dictionary::new();
        dict.insert(
            "WebBookmarkType".to_string(),
            Value::String("WebBookmarkTypeLeaf".to_string()),
        );
        dict.insert("Title".to_string(), Value::String(title.to_string()));
        dict.insert("URLString".to_string(), Value::String(url.to_string()));
        Value::Dictionary(dict)
    }

    #[test]
    fn test_load_returns_root_children_in_order() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("Bookmarks.plist");

        let mut root = Dictionary::new();
        root.insert(
            "Children".to_string(),
            Value::Array(vec![
                link_dict("First", "http://first"),
                link_dict("Second", "http://second"),
            ]),
        );
        write_archive(&archive_path, &Value::Dictionary(root));

        let source = CoreBookmarkSource::new();
        let children = source.load_root_children(&archive_path).unwrap();
        assert_eq!(children.len(), 2);
        let first = children[0].as_dictionary().unwrap();
        assert_eq!(
            first.get("Title").and_then(Value::as_string),
            Some("First")
        );
    }

    #[test]
    fn test_load_without_children_key_yields_empty_list() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("Bookmarks.plist");
        write_archive(&archive_path, &Value::Dictionary(Dictionary::new()));

        let source = CoreBookmarkSource::new();
        let children = source.load_root_children(&archive_path).unwrap();
        assert!(children.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("does_not_exist.plist");

        let source = CoreBookmarkSource::new();
        let result = source.load_root_children(&archive_path);
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[test]
    fn test_load_garbage_is_malformed_error() {
        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("Bookmarks.plist");
        std::fs::write(&archive_path, b"this is not a property list").unwrap();

        let source = CoreBookmarkSource::new();
        let result = source.load_root_children(&archive_path);
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_unreadable_file_is_access_denied() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let archive_path = dir.path().join("Bookmarks.plist");
        write_archive(&archive_path, &Value::Dictionary(Dictionary::new()));
        std::fs::set_permissions(&archive_path, std::fs::Permissions::from_mode(0o000)).unwrap();

        let source = CoreBookmarkSource::new();
        let result = source.load_root_children(&archive_path);

        // Running as root bypasses file modes; only assert when the open failed.
        if let Err(err) = result {
            match err {
                SourceError::AccessDenied(p) => assert_eq!(p, archive_path),
                other => panic!("expected AccessDenied, got {other:?}"),
            }
        }

        std::fs::set_permissions(&archive_path, std::fs::Permissions::from_mode(0o644)).unwrap();
    }
}
