use crate::core::{
    self, BookmarkNode, BookmarkSourceOperations, ExporterOperations, SourceError,
};
use crate::tui::types::{
    AppEvent, CheckState, MessageSeverity, TreeItemDescriptor, TreeItemId, UiCommand,
    UiEventHandler,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

// Bookmark nodes have no filesystem identity, so tree items are keyed by
// their index path from the root (e.g. [1, 0] = second root node's first
// child). The tree never changes shape after build, which keeps these stable.
type NodePathToItemIdMap = HashMap<Vec<usize>, TreeItemId>;

/*
 * Manages the application state and UI logic in a toolkit-agnostic manner:
 * it owns the bookmark tree, processes UI events, and answers each with the
 * commands the UI must apply. It depends on `BookmarkSourceOperations` for
 * decoding the archive and `ExporterOperations` for writing the selection,
 * both injected so tests can substitute mocks.
 */
pub struct PickerLogic {
    pub(crate) bookmark_tree: Vec<BookmarkNode>,
    pub(crate) node_path_to_item_id: NodePathToItemIdMap,
    pub(crate) next_tree_item_id_counter: u64,
    source: Arc<dyn BookmarkSourceOperations>,
    exporter: Arc<dyn ExporterOperations>,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl PickerLogic {
    pub fn new(
        source: Arc<dyn BookmarkSourceOperations>,
        exporter: Arc<dyn ExporterOperations>,
        input_path: PathBuf,
        output_path: PathBuf,
    ) -> Self {
        PickerLogic {
            bookmark_tree: Vec::new(),
            node_path_to_item_id: HashMap::new(),
            next_tree_item_id_counter: 1,
            source,
            exporter,
            input_path,
            output_path,
        }
    }

    pub(crate) fn build_tree_item_descriptors_recursive(
        nodes: &[BookmarkNode],
        node_path_prefix: &mut Vec<usize>,
        node_path_to_item_id: &mut NodePathToItemIdMap,
        next_tree_item_id_counter: &mut u64,
    ) -> Vec<TreeItemDescriptor> {
        let mut descriptors = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            let id_val = *next_tree_item_id_counter;
            *next_tree_item_id_counter += 1;
            let item_id = TreeItemId(id_val);

            node_path_prefix.push(index);
            node_path_to_item_id.insert(node_path_prefix.clone(), item_id);

            let children = match node {
                BookmarkNode::Folder { children, .. } => {
                    Self::build_tree_item_descriptors_recursive(
                        children,
                        node_path_prefix,
                        node_path_to_item_id,
                        next_tree_item_id_counter,
                    )
                }
                BookmarkNode::Link { .. } => Vec::new(),
            };
            node_path_prefix.pop();

            descriptors.push(TreeItemDescriptor {
                id: item_id,
                text: node.title().to_string(),
                is_folder: node.is_folder(),
                state: match node.is_checked() {
                    true => CheckState::Checked,
                    false => CheckState::Unchecked,
                },
                children,
            });
        }
        descriptors
    }

    pub(crate) fn find_node_mut<'a>(
        nodes: &'a mut [BookmarkNode],
        node_path: &[usize],
    ) -> Option<&'a mut BookmarkNode> {
        let (first, rest) = node_path.split_first()?;
        let node = nodes.get_mut(*first)?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            BookmarkNode::Folder { children, .. } => Self::find_node_mut(children, rest),
            BookmarkNode::Link { .. } => None,
        }
    }

    pub(crate) fn find_node_ref<'a>(
        nodes: &'a [BookmarkNode],
        node_path: &[usize],
    ) -> Option<&'a BookmarkNode> {
        let (first, rest) = node_path.split_first()?;
        let node = nodes.get(*first)?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            BookmarkNode::Folder { children, .. } => Self::find_node_ref(children, rest),
            BookmarkNode::Link { .. } => None,
        }
    }

    /*
     * Gathers the (item id, check state) pairs for a node and its whole
     * subtree, in display order, so the UI can repaint every row a toggle
     * reached.
     */
    fn collect_visual_updates_recursive(
        &self,
        node: &BookmarkNode,
        node_path: &mut Vec<usize>,
        updates: &mut Vec<(TreeItemId, CheckState)>,
    ) {
        if let Some(item_id) = self.node_path_to_item_id.get(node_path.as_slice()) {
            let check_state = match node.is_checked() {
                true => CheckState::Checked,
                false => CheckState::Unchecked,
            };
            updates.push((*item_id, check_state));

            if let BookmarkNode::Folder { children, .. } = node {
                for (index, child) in children.iter().enumerate() {
                    node_path.push(index);
                    self.collect_visual_updates_recursive(child, node_path, updates);
                    node_path.pop();
                }
            }
        } else {
            log::error!(
                "AppLogic: No tree item id recorded for node path {node_path:?} during visual update collection."
            );
        }
    }

    fn rebuild_descriptors(&mut self) -> Vec<TreeItemDescriptor> {
        self.next_tree_item_id_counter = 1;
        self.node_path_to_item_id.clear();
        let mut node_path_prefix = Vec::new();
        Self::build_tree_item_descriptors_recursive(
            &self.bookmark_tree,
            &mut node_path_prefix,
            &mut self.node_path_to_item_id,
            &mut self.next_tree_item_id_counter,
        )
    }
}

impl UiEventHandler for PickerLogic {
    /*
     * Loads and decodes the archive, builds the bookmark tree, and populates
     * the UI. A load failure leaves the tree empty and notifies the user;
     * the application keeps running so the user can fix permissions and try
     * again on a later launch.
     */
    fn on_startup(&mut self) -> Vec<UiCommand> {
        let mut commands = Vec::new();

        match self.source.load_root_children(&self.input_path) {
            Ok(children) => {
                self.bookmark_tree = core::build_bookmark_tree(&children);
                log::debug!(
                    "AppLogic: Built {} top-level bookmark node(s) from {:?}.",
                    self.bookmark_tree.len(),
                    self.input_path
                );
            }
            Err(e) => {
                log::error!("AppLogic: Failed to load bookmarks: {e}");
                self.bookmark_tree.clear();
                let message = match &e {
                    SourceError::AccessDenied(_) => {
                        "Need Full Disk Access for your terminal to read Safari bookmarks."
                            .to_string()
                    }
                    other => other.to_string(),
                };
                commands.push(UiCommand::ShowNotification {
                    severity: MessageSeverity::Error,
                    message,
                });
            }
        }

        let descriptors = self.rebuild_descriptors();
        commands.push(UiCommand::PopulateTree { items: descriptors });
        commands
    }

    fn handle_event(&mut self, event: AppEvent) -> Vec<UiCommand> {
        let mut commands = Vec::new();
        match event {
            AppEvent::TreeItemToggled { item_id, new_state } => {
                log::debug!("AppLogic: Tree item {item_id:?} toggled to {new_state:?}.");

                let mut node_path_of_toggled: Option<Vec<usize>> = None;
                for (path_candidate, id_in_map) in &self.node_path_to_item_id {
                    if *id_in_map == item_id {
                        node_path_of_toggled = Some(path_candidate.clone());
                        break;
                    }
                }

                if let Some(node_path) = node_path_of_toggled {
                    if let Some(node) = Self::find_node_mut(&mut self.bookmark_tree, &node_path) {
                        core::set_checked(node, new_state == CheckState::Checked);
                    } else {
                        log::error!(
                            "AppLogic: Model node not found for path {node_path:?} to update state."
                        );
                        return commands;
                    }

                    if let Some(node) = Self::find_node_ref(&self.bookmark_tree, &node_path) {
                        let mut updates = Vec::new();
                        let mut walk_path = node_path.clone();
                        self.collect_visual_updates_recursive(node, &mut walk_path, &mut updates);
                        for (id_to_update, state_for_ui) in updates {
                            commands.push(UiCommand::UpdateTreeItemVisualState {
                                item_id: id_to_update,
                                new_state: state_for_ui,
                            });
                        }
                    }
                } else {
                    log::error!("AppLogic: Could not find node path for {item_id:?} from UI event.");
                }
            }
            AppEvent::ExportRequested => {
                log::debug!("AppLogic: Export requested to {:?}.", self.output_path);
                match self.exporter.export(&self.bookmark_tree, &self.output_path) {
                    Ok(()) => {
                        commands.push(UiCommand::ShowNotification {
                            severity: MessageSeverity::Information,
                            message: format!("Exported selection to {}", self.output_path.display()),
                        });
                    }
                    Err(e) => {
                        log::error!("AppLogic: Export failed: {e}");
                        commands.push(UiCommand::ShowNotification {
                            severity: MessageSeverity::Error,
                            message: format!("Export failed: {e}"),
                        });
                    }
                }
            }
            AppEvent::QuitRequested => {
                log::debug!("AppLogic: Quit requested.");
                commands.push(UiCommand::Quit);
            }
        }
        commands
    }
}
