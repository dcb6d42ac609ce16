use crate::wm::Orientation;

/// What an item does when clicked. The panel returns the action; executing
/// it (spawning a process, switching desktops, popping a menu) is the host's
/// job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickAction {
    Launch { command: String },
    ShowApplicationMenu,
    SwitchDesktop { desktop: u32 },
    ShowCalendar,
}

/// The renderable entity behind a dock slot. A flat sum type: each variant
/// only contributes a label, a footprint ratio and a click action. The
/// layout engine itself is agnostic to what a slot renders.
#[derive(Debug, Clone, PartialEq)]
pub enum DockItemKind {
    /// Pinned application launcher.
    Launcher {
        name: String,
        icon: String,
        command: String,
    },
    /// Entry point for the system application menu.
    ApplicationMenu { label: String, icon: String },
    /// One virtual-desktop thumbnail; footprint follows the screen aspect.
    Pager { desktop: u32, screen_aspect: f32 },
    /// Digital clock, wider than tall.
    Clock,
    /// Thin visual divider; ignores clicks.
    Separator,
}

const CLOCK_WH_RATIO: f32 = 2.8;
const SEPARATOR_WH_RATIO: f32 = 0.1;

impl DockItemKind {
    pub fn label(&self) -> &str {
        match self {
            DockItemKind::Launcher { name, .. } => name,
            DockItemKind::ApplicationMenu { label, .. } => label,
            DockItemKind::Pager { .. } => "Desktop",
            DockItemKind::Clock => "Clock",
            DockItemKind::Separator => "",
        }
    }

    /// Width/height ratio for items that are not square icons.
    fn wh_ratio(&self) -> Option<f32> {
        match self {
            DockItemKind::Launcher { .. } | DockItemKind::ApplicationMenu { .. } => None,
            DockItemKind::Pager { screen_aspect, .. } => Some(*screen_aspect),
            DockItemKind::Clock => Some(CLOCK_WH_RATIO),
            DockItemKind::Separator => Some(SEPARATOR_WH_RATIO),
        }
    }

    pub fn on_click(&self) -> Option<ClickAction> {
        match self {
            DockItemKind::Launcher { command, .. } => Some(ClickAction::Launch {
                command: command.clone(),
            }),
            DockItemKind::ApplicationMenu { .. } => Some(ClickAction::ShowApplicationMenu),
            DockItemKind::Pager { desktop, .. } => Some(ClickAction::SwitchDesktop {
                desktop: *desktop,
            }),
            DockItemKind::Clock => Some(ClickAction::ShowCalendar),
            DockItemKind::Separator => None,
        }
    }
}

/// One entry in the panel's icon strip: its configured size bounds, its
/// current geometry in panel-local coordinates, and the interpolation
/// snapshot used while an enter/leave animation is stepping.
#[derive(Debug, Clone)]
pub struct DockItem {
    pub kind: DockItemKind,
    orientation: Orientation,
    min_size: i32,
    max_size: i32,

    /// Current rendered edge length; always within `[min_size, max_size]`.
    pub size: i32,
    pub left: i32,
    pub top: i32,
    /// Center of this item along the motion axis in the rest layout; the
    /// reference point for distance-based magnification.
    pub min_center: i32,

    pub start_size: i32,
    pub end_size: i32,
    pub start_left: i32,
    pub end_left: i32,
    pub start_top: i32,
    pub end_top: i32,

    current_step: i32,
    num_steps: i32,
}

impl DockItem {
    pub fn new(kind: DockItemKind, orientation: Orientation, min_size: i32, max_size: i32) -> Self {
        Self {
            kind,
            orientation,
            min_size,
            max_size,
            size: min_size,
            left: 0,
            top: 0,
            min_center: 0,
            start_size: min_size,
            end_size: min_size,
            start_left: 0,
            end_left: 0,
            start_top: 0,
            end_top: 0,
            current_step: 0,
            num_steps: 0,
        }
    }

    pub fn min_size(&self) -> i32 {
        self.min_size
    }

    pub fn max_size(&self) -> i32 {
        self.max_size
    }

    fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn width_for_size(&self, size: i32) -> i32 {
        match self.kind.wh_ratio() {
            None => size,
            Some(ratio) => {
                if self.is_horizontal() {
                    (size as f32 * ratio) as i32
                } else {
                    size
                }
            }
        }
    }

    pub fn height_for_size(&self, size: i32) -> i32 {
        match self.kind.wh_ratio() {
            None => size,
            Some(ratio) => {
                if self.is_horizontal() {
                    size
                } else {
                    (size as f32 / ratio) as i32
                }
            }
        }
    }

    pub fn width(&self) -> i32 {
        self.width_for_size(self.size)
    }

    pub fn height(&self) -> i32 {
        self.height_for_size(self.size)
    }

    pub fn min_width(&self) -> i32 {
        self.width_for_size(self.min_size)
    }

    pub fn min_height(&self) -> i32 {
        self.height_for_size(self.min_size)
    }

    /// Snapshot the live geometry as the interpolation start. Called when a
    /// new animation is armed so cancelling mid-flight never jumps.
    pub fn set_animation_start_as_current(&mut self) {
        self.start_size = self.size;
        self.start_left = self.left;
        self.start_top = self.top;
    }

    pub fn set_animation_end_as_current(&mut self) {
        self.end_size = self.size;
        self.end_left = self.left;
        self.end_top = self.top;
    }

    pub fn start_animation(&mut self, num_steps: i32) {
        self.num_steps = num_steps;
        self.current_step = 0;
    }

    /// Advance one frame of linear interpolation between the start and end
    /// snapshots. No-op once the terminal step has been reached.
    pub fn next_animation_step(&mut self) {
        if self.current_step < self.num_steps {
            self.current_step += 1;
            self.size = self.start_size
                + (self.end_size - self.start_size) * self.current_step / self.num_steps;
            self.left = self.start_left
                + (self.end_left - self.start_left) * self.current_step / self.num_steps;
            self.top = self.start_top
                + (self.end_top - self.start_top) * self.current_step / self.num_steps;
        }
    }
}
