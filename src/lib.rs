//! # Glade Editor Core
//!
//! The editing core of the Glade scene editor: a mutable tree of
//! identifiable scene objects, a selection store, and reversible edit
//! commands that apply and undo arbitrary mutations while keeping the
//! selection and notifying listeners.
//!
//! The crate deliberately stops at the editing layer: document
//! lifecycle, rendering, and UI live elsewhere, and so does the
//! undo/redo *stack* — [`edit::Action`] is the contract a stack
//! composes over.

pub mod document;
pub mod edit;
pub mod event;
pub mod scene;
pub mod selection;

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Logs the library version at startup.
pub fn init() {
    log::info!("Glade Core v{} initialized", VERSION);
}
