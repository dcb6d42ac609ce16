//! The dock core: item model, magnification curve, layout passes, the
//! fixed-step animation driver, and the panel controller tying them to a
//! window server.

pub mod animation;
pub mod item;
pub mod layout;
pub mod magnify;
pub mod panel;

pub use animation::{StepAnimation, TickOutcome, TransitionKind};
pub use item::{ClickAction, DockItem, DockItemKind};
pub use layout::LayoutVars;
pub use magnify::MagnifyCurve;
pub use panel::DockPanel;
