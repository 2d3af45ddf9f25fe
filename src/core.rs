/*
 * This module consolidates the core, presentation-agnostic logic of the
 * application: the bookmark tree model, the archive decoder seam, the tree
 * builder, checked-state propagation, and the export collector/writer. The
 * key abstractions (`BookmarkSourceOperations`, `ExporterOperations`) are
 * re-exported here alongside the data model so the rest of the crate imports
 * from one place.
 */
pub mod exporter;
pub mod models;
pub mod path_utils;
pub mod selection;
pub mod source;
pub mod tree_builder;

// Re-export key structures and enums
pub use models::{BookmarkNode, CategoryGroup, ExportedLink, LINK_ICON};

// Re-export source related items
pub use source::{BookmarkSourceOperations, CoreBookmarkSource, SourceError};

// Re-export tree building and selection
pub use selection::set_checked;
pub use tree_builder::build_bookmark_tree;

// Re-export exporter related items
pub use exporter::{CoreExporter, ExportError, ExporterOperations, collect_checked_links};
