//! Core of a magnifying dock panel: a strip of items pinned to a screen edge
//! that grows smoothly under the pointer, with fixed-step enter/leave
//! animations and pluggable window-system bindings.
//!
//! The crate is platform-agnostic: [`wm::WindowServer`] is the only seam to
//! the host, and [`dock::DockPanel`] drives it purely as a side effect of
//! pointer events and animation ticks. [`scheduler::drive`] runs one panel's
//! event loop on a tokio task.

pub mod config;
pub mod dock;
pub mod scheduler;
pub mod wm;

pub use config::Config;
pub use dock::{ClickAction, DockItem, DockItemKind, DockPanel};
pub use scheduler::PointerEvent;
pub use wm::{HeadlessWindowServer, PanelPosition, PanelVisibility, ScreenGeometry, WindowServer};
