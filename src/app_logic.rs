/*
 * This module provides the application logic layer, centered around
 * `PickerLogic` which acts as the Presenter/Controller between the terminal
 * UI and the core bookmark model. Unit tests for `PickerLogic` are in
 * `handler_tests.rs`.
 */
pub mod handler;


pub use handler::PickerLogic;
