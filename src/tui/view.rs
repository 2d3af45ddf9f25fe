use super::types::{CheckState, MessageSeverity, TreeItemDescriptor, TreeItemId, UiCommand};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::collections::HashSet;

/*
 * Holds everything the terminal needs to paint a frame: the display
 * descriptors received from the application logic, which folders the user
 * has expanded, the cursor position, and the current status message. This is
 * display state only; the bookmark tree itself lives in the logic layer and
 * is reached exclusively through tree item ids.
 */
pub struct ViewState {
    items: Vec<TreeItemDescriptor>,
    expanded: HashSet<TreeItemId>,
    cursor: usize,
    status: Option<(MessageSeverity, String)>,
}

// One visible line of the tree, borrowed from the descriptor hierarchy.
pub struct RowView<'a> {
    pub depth: usize,
    pub item: &'a TreeItemDescriptor,
    pub expanded: bool,
}

impl ViewState {
    pub fn new() -> Self {
        ViewState {
            items: Vec::new(),
            expanded: HashSet::new(),
            cursor: 0,
            status: None,
        }
    }

    /*
     * Applies a batch of commands from the logic layer in order. Returns true
     * when a Quit command was among them and the event loop should stop.
     */
    pub fn apply_commands(&mut self, commands: Vec<UiCommand>) -> bool {
        let mut quit = false;
        for command in commands {
            match command {
                UiCommand::PopulateTree { items } => {
                    self.items = items;
                    self.expanded.clear(); // folders start collapsed
                    self.cursor = 0;
                }
                UiCommand::UpdateTreeItemVisualState { item_id, new_state } => {
                    if !Self::update_item_state(&mut self.items, item_id, new_state) {
                        log::warn!("View: No displayed item with id {item_id:?} to update.");
                    }
                }
                UiCommand::ShowNotification { severity, message } => {
                    self.status = Some((severity, message));
                }
                UiCommand::Quit => quit = true,
            }
        }
        quit
    }

    fn update_item_state(
        items: &mut [TreeItemDescriptor],
        item_id: TreeItemId,
        new_state: CheckState,
    ) -> bool {
        for item in items.iter_mut() {
            if item.id == item_id {
                item.state = new_state;
                return true;
            }
            if Self::update_item_state(&mut item.children, item_id, new_state) {
                return true;
            }
        }
        false
    }

    /// The tree flattened to its currently visible rows, in display order.
    pub fn visible_rows(&self) -> Vec<RowView<'_>> {
        let mut rows = Vec::new();
        Self::flatten_visible(&self.items, 0, &self.expanded, &mut rows);
        rows
    }

    fn flatten_visible<'a>(
        items: &'a [TreeItemDescriptor],
        depth: usize,
        expanded: &HashSet<TreeItemId>,
        rows: &mut Vec<RowView<'a>>,
    ) {
        for item in items {
            let is_expanded = expanded.contains(&item.id);
            rows.push(RowView {
                depth,
                item,
                expanded: is_expanded,
            });
            if item.is_folder && is_expanded {
                Self::flatten_visible(&item.children, depth + 1, expanded, rows);
            }
        }
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let row_count = self.visible_rows().len();
        if row_count > 0 && self.cursor < row_count - 1 {
            self.cursor += 1;
        }
    }

    /// Id, check state and folder-ness of the row under the cursor.
    pub fn row_at_cursor(&self) -> Option<(TreeItemId, CheckState, bool)> {
        self.visible_rows()
            .get(self.cursor)
            .map(|row| (row.item.id, row.item.state, row.item.is_folder))
    }

    /// Expands or collapses the folder under the cursor; a no-op on links.
    pub fn set_expanded_at_cursor(&mut self, expand: bool) {
        let Some((item_id, _, is_folder)) = self.row_at_cursor() else {
            return;
        };
        if !is_folder {
            return;
        }
        if expand {
            self.expanded.insert(item_id);
        } else {
            self.expanded.remove(&item_id);
            // Collapsing can shrink the list past the cursor.
            let row_count = self.visible_rows().len();
            if self.cursor >= row_count && row_count > 0 {
                self.cursor = row_count - 1;
            }
        }
    }

    pub fn toggle_expanded_at_cursor(&mut self) {
        if let Some((item_id, _, is_folder)) = self.row_at_cursor() {
            if is_folder {
                let expand = !self.expanded.contains(&item_id);
                self.set_expanded_at_cursor(expand);
            }
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> Option<&(MessageSeverity, String)> {
        self.status.as_ref()
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

fn severity_color(severity: MessageSeverity) -> Color {
    match severity {
        MessageSeverity::Information => Color::Green,
        MessageSeverity::Warning => Color::Yellow,
        MessageSeverity::Error => Color::Red,
    }
}

fn row_line<'a>(row: &RowView<'a>, selected: bool) -> Line<'a> {
    let checkbox = match row.item.state {
        CheckState::Checked => "[x] ",
        CheckState::Unchecked => "[ ] ",
    };
    let marker = if row.item.is_folder {
        if row.expanded { "▾ 📁 " } else { "▸ 📁 " }
    } else {
        "  " // links align under folder markers
    };

    let indent = "  ".repeat(row.depth);
    let base_style = if row.item.is_folder {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let line_style = if selected {
        base_style.add_modifier(Modifier::REVERSED)
    } else {
        base_style
    };

    Line::from(vec![
        Span::raw(indent),
        Span::raw(checkbox),
        Span::raw(marker),
        Span::styled(row.item.text.as_str(), line_style),
    ])
}

/*
 * Paints one frame: a title, the visible slice of the tree with the cursor
 * row highlighted, the status line, and the key hints. Scrolling keeps the
 * cursor inside the tree viewport.
 */
pub fn draw(frame: &mut Frame, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "Bookmark Picker: expand folders and select links to export",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(title, chunks[0]);

    let rows = view.visible_rows();
    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| row_line(row, index == view.cursor()))
        .collect();

    let tree_area = chunks[1];
    let viewport_height = tree_area.height.saturating_sub(2) as usize; // borders
    let scroll = if viewport_height > 0 && view.cursor() >= viewport_height {
        (view.cursor() + 1 - viewport_height) as u16
    } else {
        0
    };

    let tree = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Bookmarks"))
        .scroll((scroll, 0));
    frame.render_widget(tree, tree_area);

    let status_line = match view.status() {
        Some((severity, message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(severity_color(*severity)),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(status_line), chunks[2]);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[↑/↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" move  "),
        Span::styled("[→/←]", Style::default().fg(Color::Yellow)),
        Span::raw(" expand/collapse  "),
        Span::styled("[space]", Style::default().fg(Color::Yellow)),
        Span::raw(" toggle  "),
        Span::styled("[e]", Style::default().fg(Color::Yellow)),
        Span::raw(" export  "),
        Span::styled("[q]", Style::default().fg(Color::Yellow)),
        Span::raw(" quit"),
    ]));
    frame.render_widget(footer, chunks[3]);
}
