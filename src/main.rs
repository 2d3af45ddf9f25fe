// src/main.rs

mod app_logic;
mod core;
mod tui;

use crate::app_logic::PickerLogic;
use crate::core::{CoreBookmarkSource, CoreExporter, path_utils};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

const APP_NAME: &str = "BookmarkPicker";

/*
 * Logging goes to a file under the per-user config directory because the TUI
 * owns the terminal while the application runs. Initialization is
 * best-effort: a missing log directory degrades to no logging, never to a
 * startup failure.
 */
fn init_logging() {
    let Some(log_dir) = path_utils::get_base_app_config_local_dir(APP_NAME) else {
        eprintln!("Warning: could not determine a log directory; logging disabled.");
        return;
    };
    let log_path = log_dir.join(path_utils::LOG_FILENAME);
    match File::create(&log_path) {
        Ok(file) => {
            if WriteLogger::init(LevelFilter::Debug, Config::default(), file).is_err() {
                eprintln!("Warning: logger was already initialized.");
            }
        }
        Err(e) => eprintln!("Warning: could not open log file {log_path:?}: {e}"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let input_path = path_utils::default_bookmarks_path()
        .ok_or("could not determine the user's home directory")?;
    let output_path = path_utils::default_export_path();
    log::info!("Starting bookmark picker: input {input_path:?}, output {output_path:?}");

    let source = Arc::new(CoreBookmarkSource::new());
    let exporter = Arc::new(CoreExporter::new());
    let mut logic = PickerLogic::new(source, exporter, input_path, output_path);

    tui::run(&mut logic)?;

    log::info!("Bookmark picker exited.");
    Ok(())
}
