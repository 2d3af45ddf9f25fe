//! Terminal user interface.
//!
//! Owns the terminal (raw mode + alternate screen), translates key presses
//! into `AppEvent`s for the application logic, and applies the returned
//! `UiCommand`s to the view. Domain state never lives here.

use std::io;

use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};

pub mod types;
pub mod view;

use types::{AppEvent, UiEventHandler};
use view::ViewState;

/// Runs the picker UI until the handler issues a Quit command.
pub fn run(handler: &mut dyn UiEventHandler) -> io::Result<()> {
    // Setup terminal. Drawing goes to stderr so a redirected stdout stays clean.
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main event loop: draw, read one key, dispatch, apply commands.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    handler: &mut dyn UiEventHandler,
) -> io::Result<()>
where
    std::io::Error: From<<B as Backend>::Error>,
{
    let mut view = ViewState::new();
    if view.apply_commands(handler.on_startup()) {
        return Ok(());
    }

    loop {
        terminal.draw(|frame| view::draw(frame, &view))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    if view.apply_commands(handler.handle_event(AppEvent::QuitRequested)) {
                        return Ok(());
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => view.move_cursor_up(),
                KeyCode::Down | KeyCode::Char('j') => view.move_cursor_down(),
                KeyCode::Right => view.set_expanded_at_cursor(true),
                KeyCode::Left => view.set_expanded_at_cursor(false),
                KeyCode::Enter => view.toggle_expanded_at_cursor(),
                KeyCode::Char(' ') => {
                    if let Some((item_id, state, _)) = view.row_at_cursor() {
                        let commands = handler.handle_event(AppEvent::TreeItemToggled {
                            item_id,
                            new_state: state.toggled(),
                        });
                        if view.apply_commands(commands) {
                            return Ok(());
                        }
                    }
                }
                KeyCode::Char('e') => {
                    if view.apply_commands(handler.handle_event(AppEvent::ExportRequested)) {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}
