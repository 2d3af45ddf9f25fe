use super::models::BookmarkNode;
use plist::{Dictionary, Value};

/*
 * Builds the in-memory bookmark tree from the decoded archive structure.
 * Classification is driven by the archive's type discriminator: container
 * nodes recurse into their child list, leaf nodes become links, and anything
 * else is dropped. Malformed entries are never an error; the archive regularly
 * contains proxy and reading-list entries this tool has no use for.
 */

const TYPE_KEY: &str = "WebBookmarkType";
const TYPE_FOLDER: &str = "WebBookmarkTypeList";
const TYPE_LINK: &str = "WebBookmarkTypeLeaf";
const TITLE_KEY: &str = "Title";
const CHILDREN_KEY: &str = "Children";
const URL_KEY: &str = "URLString";
const URI_DICTIONARY_KEY: &str = "URIDictionary";
const URI_TITLE_KEY: &str = "title";
const DEFAULT_TITLE: &str = "Untitled";

/*
 * Walks one level of decoded source nodes and produces the corresponding
 * bookmark nodes, depth-first and in source order. Order is significant: it
 * is preserved both for display and for export grouping.
 */
pub fn build_bookmark_tree(source_nodes: &[Value]) -> Vec<BookmarkNode> {
    let mut nodes = Vec::new();
    for value in source_nodes {
        let Some(dict) = value.as_dictionary() else {
            log::trace!("TreeBuilder: Skipping non-dictionary source node.");
            continue;
        };
        let title = node_title(dict);

        match dict.get(TYPE_KEY).and_then(Value::as_string) {
            Some(TYPE_FOLDER) => {
                // A list node without a child array carries nothing displayable.
                if let Some(children) = dict.get(CHILDREN_KEY).and_then(Value::as_array) {
                    nodes.push(BookmarkNode::new_folder(
                        title,
                        build_bookmark_tree(children),
                    ));
                } else {
                    log::trace!("TreeBuilder: Skipping folder '{title}' without children field.");
                }
            }
            Some(TYPE_LINK) => match dict.get(URL_KEY).and_then(Value::as_string) {
                Some(url) if !url.is_empty() => {
                    nodes.push(BookmarkNode::new_link(title, url.to_string()));
                }
                _ => {
                    log::trace!("TreeBuilder: Skipping link '{title}' with empty or missing URL.");
                }
            },
            other => {
                log::trace!("TreeBuilder: Skipping node '{title}' with discriminator {other:?}.");
            }
        }
    }
    nodes
}

// Title resolution: the primary field, then the nested URI-info title carried
// by link nodes, then the fixed fallback.
fn node_title(dict: &Dictionary) -> String {
    if let Some(title) = dict.get(TITLE_KEY).and_then(Value::as_string) {
        return title.to_string();
    }
    dict.get(URI_DICTIONARY_KEY)
        .and_then(Value::as_dictionary)
        .and_then(|uri| uri.get(URI_TITLE_KEY))
        .and_then(Value::as_string)
        .unwrap_or(DEFAULT_TITLE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::BookmarkNode;

    fn link(title: Option<&str>, url: Option<&str>) -> Value {
        let mut dict = Dictionary::new();
        dict.insert(
            TYPE_KEY.to_string(),
            Value::String(TYPE_LINK.to_string()),
        );
        if let Some(title) = title {
            dict.insert(TITLE_KEY.to_string(), Value::String(title.to_string()));
        }
        if let Some(url) = url {
            dict.insert(URL_KEY.to_string(), Value::String(url.to_string()));
        }
        Value::Dictionary(dict)
    }

    fn folder(title: &str, children: Option<Vec<Value>>) -> Value {
        let mut dict = Dictionary::new();
        dict.insert(
            TYPE_KEY.to_string(),
            Value::String(TYPE_FOLDER.to_string()),
        );
        dict.insert(TITLE_KEY.to_string(), Value::String(title.to_string()));
        if let Some(children) = children {
            dict.insert(CHILDREN_KEY.to_string(), Value::Array(children));
        }
        Value::Dictionary(dict)
    }

    #[test]
    fn test_build_classifies_folders_and_links_in_source_order() {
        let source = vec![
            folder(
                "Dev",
                Some(vec![
                    link(Some("A"), Some("http://a")),
                    link(Some("B"), Some("http://b")),
                ]),
            ),
            link(Some("C"), Some("http://c")),
        ];

        let tree = build_bookmark_tree(&source);
        assert_eq!(tree.len(), 2);
        match &tree[0] {
            BookmarkNode::Folder {
                title,
                checked,
                children,
            } => {
                assert_eq!(title, "Dev");
                assert!(!checked);
                assert_eq!(children.len(), 2);
                assert_eq!(children[0].title(), "A");
                assert_eq!(children[1].title(), "B");
            }
            BookmarkNode::Link { .. } => panic!("expected folder first"),
        }
        assert_eq!(tree[1].title(), "C");
        assert!(!tree[1].is_folder());
    }

    #[test]
    fn test_build_drops_links_without_url() {
        let source = vec![
            link(Some("No url"), None),
            link(Some("Empty url"), Some("")),
            link(Some("Kept"), Some("http://kept")),
        ];

        let tree = build_bookmark_tree(&source);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title(), "Kept");
    }

    #[test]
    fn test_build_drops_unknown_discriminators_and_shapes() {
        let mut proxy = Dictionary::new();
        proxy.insert(
            TYPE_KEY.to_string(),
            Value::String("WebBookmarkTypeProxy".to_string()),
        );
        proxy.insert(TITLE_KEY.to_string(), Value::String("History".to_string()));

        let mut untyped = Dictionary::new();
        untyped.insert(TITLE_KEY.to_string(), Value::String("Stray".to_string()));

        let source = vec![
            Value::Dictionary(proxy),
            Value::Dictionary(untyped),
            Value::String("not even a dictionary".to_string()),
            link(Some("Kept"), Some("http://kept")),
        ];

        let tree = build_bookmark_tree(&source);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title(), "Kept");
    }

    #[test]
    fn test_build_folder_without_children_field_is_dropped() {
        let source = vec![folder("Hollow", None), link(Some("A"), Some("http://a"))];
        let tree = build_bookmark_tree(&source);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].title(), "A");
    }

    #[test]
    fn test_title_falls_back_to_uri_dictionary_then_untitled() {
        let mut uri = Dictionary::new();
        uri.insert(
            URI_TITLE_KEY.to_string(),
            Value::String("Nested title".to_string()),
        );
        let mut with_uri = Dictionary::new();
        with_uri.insert(
            TYPE_KEY.to_string(),
            Value::String(TYPE_LINK.to_string()),
        );
        with_uri.insert(URI_DICTIONARY_KEY.to_string(), Value::Dictionary(uri));
        with_uri.insert(
            URL_KEY.to_string(),
            Value::String("http://nested".to_string()),
        );

        let source = vec![
            Value::Dictionary(with_uri),
            link(None, Some("http://untitled")),
        ];

        let tree = build_bookmark_tree(&source);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].title(), "Nested title");
        assert_eq!(tree[1].title(), "Untitled");
    }

    #[test]
    fn test_build_preserves_nested_depth() {
        let source = vec![folder(
            "Outer",
            Some(vec![folder(
                "Inner",
                Some(vec![link(Some("Deep"), Some("http://deep"))]),
            )]),
        )];

        let tree = build_bookmark_tree(&source);
        let BookmarkNode::Folder { children, .. } = &tree[0] else {
            panic!("expected folder");
        };
        let BookmarkNode::Folder {
            children: inner, ..
        } = &children[0]
        else {
            panic!("expected nested folder");
        };
        assert_eq!(inner[0].title(), "Deep");
    }
}
