/*
 * This module defines the data types used for communication between the
 * application logic and the terminal UI. It includes identifiers for tree
 * items, display descriptors, UI events (`AppEvent`), commands for the UI
 * (`UiCommand`), severity levels for status messages, and the
 * `UiEventHandler` trait that the application logic implements. Keeping this
 * vocabulary free of any toolkit type keeps the logic layer testable without
 * a terminal.
 */

// An opaque identifier for an item in the displayed tree.
//
// Identifiers are generated by the application logic while it builds the
// display descriptors; the UI echoes them back in events without knowing
// what they address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TreeItemId(pub u64);

// Represents the visual check state of a row's checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
}

impl CheckState {
    pub fn toggled(self) -> Self {
        match self {
            CheckState::Checked => CheckState::Unchecked,
            CheckState::Unchecked => CheckState::Checked,
        }
    }
}

// Describes a single item to be displayed in the tree.
//
// Produced by the application logic to define the content and hierarchy of
// the tree view; the UI renders it and owns no other model of the data.
#[derive(Debug, Clone)]
pub struct TreeItemDescriptor {
    pub id: TreeItemId,
    pub text: String,
    pub is_folder: bool,
    pub state: CheckState,
    pub children: Vec<TreeItemDescriptor>,
}

// Defines the severity of a status-line message. Ordered from least to most
// severe for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageSeverity {
    Information,
    Warning,
    Error,
}

/*
 * Represents toolkit-agnostic UI events. The terminal event loop translates
 * raw key presses into these and hands them to the application logic.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    TreeItemToggled {
        item_id: TreeItemId,
        new_state: CheckState,
    },
    ExportRequested,
    QuitRequested,
}

/*
 * Represents commands sent from the application logic back to the UI. These
 * instruct the UI to (re)display data or report something to the user; they
 * never carry domain state beyond the display descriptors.
 */
#[derive(Debug, Clone)]
pub enum UiCommand {
    PopulateTree {
        items: Vec<TreeItemDescriptor>,
    },
    UpdateTreeItemVisualState {
        item_id: TreeItemId,
        new_state: CheckState,
    },
    ShowNotification {
        severity: MessageSeverity,
        message: String,
    },
    Quit,
}

// A trait to be implemented by the application logic layer to handle UI events.
//
// The UI calls `on_startup` once before entering its loop and `handle_event`
// for every translated user action, applying the returned commands in order.
pub trait UiEventHandler {
    fn on_startup(&mut self) -> Vec<UiCommand>;
    fn handle_event(&mut self, event: AppEvent) -> Vec<UiCommand>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_state_toggles_both_ways() {
        assert_eq!(CheckState::Checked.toggled(), CheckState::Unchecked);
        assert_eq!(CheckState::Unchecked.toggled(), CheckState::Checked);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(MessageSeverity::Error > MessageSeverity::Warning);
        assert!(MessageSeverity::Warning > MessageSeverity::Information);
    }
}
