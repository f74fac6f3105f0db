//! Pointer-driven window interaction for a desktop of overlapping,
//! free-form windows rendered in the terminal.
//!
//! [`engine::InteractionEngine`] is the core: it opens drag and resize
//! sessions, commits clamped geometry to a [`store::WindowStore`] on every
//! pointer move, and keeps global pointer listeners attached exactly while a
//! session is open. [`desktop::Desktop`] wires it to a ratatui frame.

pub mod apps;
pub mod config;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod engine;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod listeners;
pub mod runner;
pub mod session;
pub mod store;
pub mod tracing_sub;
pub mod ui;
pub mod window;
