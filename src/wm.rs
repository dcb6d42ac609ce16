use serde::{Deserialize, Serialize};

/// Screen edge a panel is anchored to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PanelPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl PanelPosition {
    pub fn orientation(self) -> Orientation {
        match self {
            PanelPosition::Top | PanelPosition::Bottom => Orientation::Horizontal,
            PanelPosition::Left | PanelPosition::Right => Orientation::Vertical,
        }
    }

    pub fn is_horizontal(self) -> bool {
        self.orientation() == Orientation::Horizontal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// How the panel interacts with other windows on its screen edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PanelVisibility {
    #[default]
    AlwaysVisible,
    AutoHide,
    WindowsCanCover,
    WindowsGoBelow,
}

/// Geometry of the screen a panel lives on, in absolute desktop coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenGeometry {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ScreenGeometry {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Stacking order requested for the panel window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOrder {
    KeepAbove,
    KeepBelow,
}

/// Operations the panel invokes on the host window system.
///
/// The layout engine never talks to X11/Wayland directly; the compositor or
/// window-manager binding implements this port and the panel drives it as a
/// side effect of layout and animation.
pub trait WindowServer {
    /// Move the panel window to absolute desktop coordinates.
    fn move_window(&mut self, x: i32, y: i32);
    /// Resize the panel window.
    fn resize_window(&mut self, width: i32, height: i32);
    /// Reserve `thickness` pixels of screen edge space (a strut). Zero clears
    /// the reservation.
    fn reserve_edge(&mut self, edge: PanelPosition, thickness: i32);
    /// Raise or lower the panel relative to normal windows.
    fn set_stack_order(&mut self, order: StackOrder);
    /// Ask the host to repaint the panel with its current geometry.
    fn request_redraw(&mut self);
}

/// Window server that only logs the requested operations. Used by the
/// headless binary and as a stand-in while a platform backend is wired up.
#[derive(Debug, Default)]
pub struct HeadlessWindowServer {
    position: (i32, i32),
    size: (i32, i32),
}

impl HeadlessWindowServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window_position(&self) -> (i32, i32) {
        self.position
    }

    pub fn window_size(&self) -> (i32, i32) {
        self.size
    }
}

impl WindowServer for HeadlessWindowServer {
    fn move_window(&mut self, x: i32, y: i32) {
        self.position = (x, y);
        tracing::debug!("wm: move window to ({x}, {y})");
    }

    fn resize_window(&mut self, width: i32, height: i32) {
        self.size = (width, height);
        tracing::debug!("wm: resize window to {width}x{height}");
    }

    fn reserve_edge(&mut self, edge: PanelPosition, thickness: i32) {
        tracing::debug!("wm: reserve {thickness}px on {edge:?} edge");
    }

    fn set_stack_order(&mut self, order: StackOrder) {
        tracing::debug!("wm: set stack order {order:?}");
    }

    fn request_redraw(&mut self) {}
}
