//! # UI Module
//!
//! The terminal presentation surface for the device picker.
//!
//! ## Components
//!
//! - [`App`] - Surface state (cursor, search input, focus, help modal)
//! - [`mod@render`] - Rendering functions for drawing the TUI
//! - [`theme`] - Built-in color themes
//! - [`config`] - Persisted user settings
//!
//! ## Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │        Header (pack name, device count)         │
//! ├─────────────────────────────────────────────────┤
//! │                  Search bar                     │
//! ├─────────────────────┬───────────────────────────┤
//! │                     │                           │
//! │   Device List       │    Device Description     │
//! │   (subfamilies &    │                           │
//! │    devices)         │                           │
//! │                     │                           │
//! ├─────────────────────┴───────────────────────────┤
//! │                    Footer                       │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Every search keystroke goes through
//! [`Selector::on_search_text_changed`](crate::selector::Selector::on_search_text_changed)
//! and every Enter through
//! [`Selector::on_device_activated`](crate::selector::Selector::on_device_activated);
//! the returned instruction is applied with [`App::apply`].

pub mod app;
pub mod config;
pub mod render;
pub mod theme;

pub use app::{App, SurfaceMessage};
pub use render::render;
