//! Terminal front-end: wires stdin commands, the core state machine and the
//! network engine together.
mod app;
mod config;
mod effects;
mod input;
mod logging;
mod render;

pub use app::run_app;
