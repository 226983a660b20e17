// Library surface for headless/integration tests and reuse.
// The binary in main.rs only adds argument parsing, logging and the terminal loop.
pub mod app;
pub mod app_dirs;
pub mod blanks;
pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod modes;
pub mod progress;
pub mod runtime;
pub mod shuffle;
pub mod ui;
pub mod util;

pub use app::App;
