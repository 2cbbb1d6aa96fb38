//! Dev console — live, filterable view over the capture pipeline.
//!
//! A [`DevConsole`] mirrors the capture's history, applies a local level
//! filter, tracks which entries have their details expanded, and renders
//! the visible feed as text. It is a pure consumer of the capture's
//! public contract.

mod view;

pub use view::{ConsoleFilter, DevConsole};
