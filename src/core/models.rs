use serde::{Deserialize, Serialize};

// Marker emitted for every exported link. The output consumer renders it verbatim.
pub const LINK_ICON: &str = "🔗";

// Represents one node of the bookmark tree, fixed as either a folder or a link
// at construction time. All three consumers (tree builder, selection, exporter)
// match exhaustively on the variant, so there is no stringly-typed "type" field
// to re-check downstream. `checked` is the only field that changes after build.
#[derive(Debug, Clone, PartialEq)]
pub enum BookmarkNode {
    Folder {
        title: String,
        checked: bool,
        children: Vec<BookmarkNode>,
    },
    Link {
        title: String,
        url: String,
        checked: bool,
    },
}

impl BookmarkNode {
    /// Creates a folder node with its full child sequence. Checked starts false.
    pub fn new_folder(title: String, children: Vec<BookmarkNode>) -> Self {
        BookmarkNode::Folder {
            title,
            checked: false,
            children,
        }
    }

    /// Creates a link node. Callers must only pass a non-empty URL; the tree
    /// builder drops URL-less source nodes before this point.
    pub fn new_link(title: String, url: String) -> Self {
        BookmarkNode::Link {
            title,
            url,
            checked: false,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            BookmarkNode::Folder { title, .. } => title,
            BookmarkNode::Link { title, .. } => title,
        }
    }

    pub fn is_checked(&self) -> bool {
        match self {
            BookmarkNode::Folder { checked, .. } => *checked,
            BookmarkNode::Link { checked, .. } => *checked,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, BookmarkNode::Folder { .. })
    }
}

/*
 * One link as it appears in the export file. This is the serialization schema,
 * kept separate from `BookmarkNode` so the in-memory tree never needs to derive
 * Serialize and the output format can evolve without touching the model.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedLink {
    pub title: String,
    pub url: String,
    pub icon: String,
}

impl ExportedLink {
    pub fn new(title: &str, url: &str) -> Self {
        ExportedLink {
            title: title.to_string(),
            url: url.to_string(),
            icon: LINK_ICON.to_string(),
        }
    }
}

/*
 * One export-time grouping: the checked links that share an immediate parent
 * folder, labeled with that folder's title (or "Uncategorized" for links that
 * sit directly at the root). The export file is an ordered array of these.
 */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub links: Vec<ExportedLink>,
}
