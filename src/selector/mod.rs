//! # Selector Module
//!
//! Live filtering and single-device selection over a built
//! [`Catalog`](crate::catalog::Catalog).
//!
//! The [`Selector`] owns the catalog as an immutable snapshot and two pieces
//! of carry-over state: the search text and the selected device. Each event
//! returns a [`RenderInstruction`] for the presentation surface:
//!
//! - [`Selector::on_search_text_changed`] recomputes a full [`VisibilityMap`]
//! - [`Selector::on_device_activated`] moves the selection

pub mod filter;
pub mod state;

pub use filter::{compute_visibility, GroupVisibility, VisibilityMap};
pub use state::{RenderInstruction, SelectionState, Selector};
