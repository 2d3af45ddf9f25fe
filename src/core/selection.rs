use super::models::BookmarkNode;

/// Sets the checked state of a node and, for folders, of every descendant.
///
/// Propagation is unconditional and downward only: checking or unchecking a
/// folder overrides whatever individual state its descendants held, while
/// toggling a link leaves ancestors and siblings untouched. Applying the same
/// value twice is a no-op.
///
/// This function modifies the node and its children in place.
pub fn set_checked(node: &mut BookmarkNode, value: bool) {
    match node {
        BookmarkNode::Link { checked, .. } => {
            *checked = value;
        }
        BookmarkNode::Folder {
            checked, children, ..
        } => {
            *checked = value;
            for child in children.iter_mut() {
                set_checked(child, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::BookmarkNode;

    // Helper to create a small tree for testing:
    //   Folder "Dev" [ Link "A", Folder "Sub" [ Link "B" ] ], Link "C"
    fn create_test_tree() -> Vec<BookmarkNode> {
        vec![
            BookmarkNode::new_folder(
                "Dev".to_string(),
                vec![
                    BookmarkNode::new_link("A".to_string(), "http://a".to_string()),
                    BookmarkNode::new_folder(
                        "Sub".to_string(),
                        vec![BookmarkNode::new_link(
                            "B".to_string(),
                            "http://b".to_string(),
                        )],
                    ),
                ],
            ),
            BookmarkNode::new_link("C".to_string(), "http://c".to_string()),
        ]
    }

    fn assert_all_checked(node: &BookmarkNode, expected: bool) {
        assert_eq!(node.is_checked(), expected, "node '{}'", node.title());
        if let BookmarkNode::Folder { children, .. } = node {
            for child in children {
                assert_all_checked(child, expected);
            }
        }
    }

    #[test]
    fn test_checking_folder_checks_every_descendant() {
        let mut tree = create_test_tree();
        set_checked(&mut tree[0], true);

        assert_all_checked(&tree[0], true);
        // The sibling link outside the folder is unaffected.
        assert!(!tree[1].is_checked());
    }

    #[test]
    fn test_unchecking_folder_overrides_descendant_state() {
        let mut tree = create_test_tree();
        set_checked(&mut tree[0], true);

        // Individually re-check a deep link, then uncheck the folder; the
        // folder's value wins everywhere below it.
        set_checked(&mut tree[0], false);
        assert_all_checked(&tree[0], false);
    }

    #[test]
    fn test_toggling_link_leaves_ancestors_and_siblings_alone() {
        let mut tree = create_test_tree();
        let BookmarkNode::Folder { children, .. } = &mut tree[0] else {
            panic!("expected folder");
        };
        set_checked(&mut children[0], true);

        assert!(tree[0].is_checked() == false);
        let BookmarkNode::Folder { children, .. } = &tree[0] else {
            panic!("expected folder");
        };
        assert!(children[0].is_checked());
        assert!(!children[1].is_checked());
        assert!(!tree[1].is_checked());
    }

    #[test]
    fn test_set_checked_is_idempotent() {
        let mut tree = create_test_tree();
        set_checked(&mut tree[0], true);
        let snapshot = tree.clone();
        set_checked(&mut tree[0], true);
        assert_eq!(tree, snapshot);
    }
}
