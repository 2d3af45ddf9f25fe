use super::models::{BookmarkNode, CategoryGroup, ExportedLink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/*
 * Turns the checked subset of the bookmark tree into the grouped export
 * document and writes it to disk as JSON. Collection is a read-only
 * projection: the tree is never mutated here, so a failed write leaves the
 * user's selection intact for another attempt.
 */

// Category label for checked links sitting directly at the root, outside any folder.
const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> Self {
        ExportError::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialize(err)
    }
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "Export I/O error: {e}"),
            ExportError::Serialize(e) => write!(f, "Export serialization error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(e) => Some(e),
            ExportError::Serialize(e) => Some(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

/*
 * Gathers every checked link, grouped by its immediate parent folder.
 *
 * Each folder opens an independent scope whose category name is the folder's
 * title; the root scope is labeled "Uncategorized". A scope contributes one
 * group, appended when its child iteration finishes, and only if it collected
 * at least one checked link. Nested folder groups therefore land in the
 * output at their recursion-return point and the root group, if any, lands
 * last. A
 * folder's own checked flag is never consulted: checking a folder only
 * matters through the propagation already applied to its children.
 */
pub fn collect_checked_links(nodes: &[BookmarkNode]) -> Vec<CategoryGroup> {
    let mut groups = Vec::new();
    collect_scope(None, nodes, &mut groups);
    groups
}

fn collect_scope(
    scope_title: Option<&str>,
    children: &[BookmarkNode],
    groups: &mut Vec<CategoryGroup>,
) {
    let mut scope_links = Vec::new();

    for child in children {
        match child {
            BookmarkNode::Link {
                title,
                url,
                checked,
            } => {
                if *checked {
                    scope_links.push(ExportedLink::new(title, url));
                }
            }
            BookmarkNode::Folder {
                title, children, ..
            } => {
                collect_scope(Some(title), children, groups);
            }
        }
    }

    if !scope_links.is_empty() {
        groups.push(CategoryGroup {
            category: scope_title.unwrap_or(UNCATEGORIZED).to_string(),
            links: scope_links,
        });
    }
}

/*
 * Defines the export operation as a seam so application logic can be tested
 * with a recording mock. The concrete implementation collects and writes in
 * one call; collection itself stays a free function for direct testing.
 */
pub trait ExporterOperations: Send + Sync {
    fn export(&self, nodes: &[BookmarkNode], output_path: &Path) -> Result<()>;
}

pub struct CoreExporter {}

impl CoreExporter {
    pub fn new() -> Self {
        CoreExporter {}
    }
}

impl Default for CoreExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExporterOperations for CoreExporter {
    /*
     * Writes the grouped selection to `output_path` as pretty-printed JSON.
     * An empty selection still produces a valid file containing an empty
     * array.
     */
    fn export(&self, nodes: &[BookmarkNode], output_path: &Path) -> Result<()> {
        let groups = collect_checked_links(nodes);
        log::debug!(
            "Exporter: Writing {} category group(s) to {output_path:?}.",
            groups.len()
        );

        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &groups)?;
        writer.flush()?;
        Ok(())
    }
}
