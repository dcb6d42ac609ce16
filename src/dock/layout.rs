use crate::wm::{Orientation, PanelPosition};

use super::item::DockItem;
use super::magnify::MagnifyCurve;

/// Derived layout quantities for one panel: rest and hover bounding boxes,
/// spacing, and the magnification curve. Recomputed whenever the item list
/// or the size configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutVars {
    pub position: PanelPosition,
    pub min_size: i32,
    pub max_size: i32,
    pub spacing: i32,
    pub auto_hide: bool,
    pub curve: MagnifyCurve,

    /// Rest-state bounding box of the icon strip.
    pub min_width: i32,
    pub min_height: i32,
    /// Hover-state bounding box reachable under full magnification.
    pub max_width: i32,
    pub max_height: i32,
}

impl LayoutVars {
    pub fn compute(
        position: PanelPosition,
        min_size: i32,
        max_size: i32,
        spacing: i32,
        auto_hide: bool,
        items: &[DockItem],
    ) -> Self {
        let curve = MagnifyCurve::new(min_size, max_size, spacing);
        let distance = min_size + spacing;

        // Growth of the strip along the motion axis when the cursor fully
        // magnifies the densest reachable neighborhood. Up to five items can
        // sit inside the falloff radius at once.
        let p = |x: i32| curve.size_at(x);
        let delta = match items.len() {
            0 => 0,
            1 => p(0) - min_size,
            2 => p(0) + p(distance) - 2 * min_size,
            3 => p(0) + 2 * p(distance) - 3 * min_size,
            4 => p(0) + 2 * p(distance) + p(2 * distance) - 4 * min_size,
            _ => p(0) + 2 * p(distance) + 2 * p(2 * distance) - 5 * min_size,
        };

        let mut vars = Self {
            position,
            min_size,
            max_size,
            spacing,
            auto_hide,
            curve,
            min_width: 0,
            min_height: 0,
            max_width: 0,
            max_height: 0,
        };

        if position.is_horizontal() {
            vars.min_width = items
                .iter()
                .map(|item| item.min_width() + spacing)
                .sum::<i32>();
            vars.min_height = if auto_hide { 1 } else { distance };
            vars.max_width = vars.min_width + delta;
            vars.max_height = spacing + max_size;
        } else {
            vars.min_height = items
                .iter()
                .map(|item| item.min_height() + spacing)
                .sum::<i32>();
            vars.min_width = if auto_hide { 1 } else { distance };
            vars.max_height = vars.min_height + delta;
            vars.max_width = spacing + max_size;
        }

        vars
    }

    pub fn orientation(&self) -> Orientation {
        self.position.orientation()
    }

    pub fn is_horizontal(&self) -> bool {
        self.position.is_horizontal()
    }

    /// `min_size + spacing`: the strip's rest cross-extent and the rest
    /// distance between neighboring item centers.
    pub fn slot_distance(&self) -> i32 {
        self.min_size + self.spacing
    }

    /// Background plate size at rest (cross-extent collapses to 1px when the
    /// panel auto-hides).
    pub fn rest_background(&self) -> (i32, i32) {
        if self.is_horizontal() {
            (
                self.min_width,
                if self.auto_hide {
                    1
                } else {
                    self.slot_distance()
                },
            )
        } else {
            (
                if self.auto_hide {
                    1
                } else {
                    self.slot_distance()
                },
                self.min_height,
            )
        }
    }

    /// Background plate size while the cursor drives the layout.
    pub fn hover_background(&self) -> (i32, i32) {
        if self.is_horizontal() {
            (self.max_width, self.slot_distance())
        } else {
            (self.slot_distance(), self.max_height)
        }
    }

    /// Translation that maps rest-layout coordinates (relative to the
    /// minimized window) into the maximized window, keeping the strip
    /// centered along the motion axis and flush against the anchored edge.
    pub fn rest_to_hover_translation(&self) -> (i32, i32) {
        let distance = self.slot_distance();
        match self.position {
            PanelPosition::Top => ((self.max_width - self.min_width) / 2, self.min_height - distance),
            PanelPosition::Bottom => (
                (self.max_width - self.min_width) / 2,
                self.max_height - self.min_height,
            ),
            PanelPosition::Left => (self.min_width - distance, (self.max_height - self.min_height) / 2),
            PanelPosition::Right => (
                self.max_width - self.min_width,
                (self.max_height - self.min_height) / 2,
            ),
        }
    }
}

/// Pack every item at its minimum size from the strip's leading edge, record
/// each item's rest center, and return the background plate size. Invoking
/// this twice without a configuration change yields identical geometry.
pub fn apply_rest_layout(vars: &LayoutVars, items: &mut [DockItem]) -> (i32, i32) {
    let spacing = vars.spacing;
    let horizontal = vars.is_horizontal();

    for i in 0..items.len() {
        items[i].size = vars.min_size;
        if horizontal {
            items[i].left = if i == 0 {
                spacing / 2
            } else {
                items[i - 1].left + items[i - 1].min_width() + spacing
            };
            items[i].top = spacing / 2;
            items[i].min_center = items[i].left + items[i].min_width() / 2;
        } else {
            items[i].left = spacing / 2;
            items[i].top = if i == 0 {
                spacing / 2
            } else {
                items[i - 1].top + items[i - 1].min_height() + spacing
            };
            items[i].min_center = items[i].top + items[i].min_height() / 2;
        }
    }

    if horizontal {
        (vars.min_width, vars.slot_distance())
    } else {
        (vars.slot_distance(), vars.min_height)
    }
}

/// Continuous cursor-driven layout.
///
/// `window_extent` is the host window's extent along the motion axis *before*
/// this update; the re-centering term `(window_extent - min_extent) / 2`
/// translates the cursor back into rest-layout coordinates. Using the prior
/// frame's extent reproduces the original behavior and can lag one frame
/// under fast motion.
///
/// Three passes over the strip:
/// 1. forward: size every item from the curve and chain positions using the
///    current (possibly magnified) extents;
/// 2. backward from the tail down to the last magnified item, so the
///    unmagnified tail stays flush against the strip's far edge;
/// 3. if the magnified region touches the head but not the tail, re-chain it
///    backwards from its right neighbor so the head stays flush too.
pub fn apply_cursor_layout(
    vars: &LayoutVars,
    items: &mut [DockItem],
    cursor: (i32, i32),
    window_extent: i32,
) {
    if items.is_empty() {
        return;
    }

    let spacing = vars.spacing;
    let horizontal = vars.is_horizontal();
    let recenter = if horizontal {
        (window_extent - vars.min_width) / 2
    } else {
        (window_extent - vars.min_height) / 2
    };
    let cursor_coord = if horizontal { cursor.0 } else { cursor.1 };

    let mut first_magnified: Option<usize> = None;
    let mut last_magnified: usize = 0;

    if horizontal {
        items[0].left = spacing / 2;
    } else {
        items[0].top = spacing / 2;
    }
    for i in 0..items.len() {
        let delta = (items[i].min_center - cursor_coord + recenter).abs();
        if delta < vars.curve.max_distance() {
            if first_magnified.is_none() {
                first_magnified = Some(i);
            }
            last_magnified = i;
        }
        items[i].size = vars.curve.size_at(delta);

        match vars.position {
            PanelPosition::Top => items[i].top = spacing / 2,
            PanelPosition::Bottom => {
                items[i].top = spacing / 2 + vars.max_size - items[i].height()
            }
            PanelPosition::Left => items[i].left = spacing / 2,
            PanelPosition::Right => {
                items[i].left = spacing / 2 + vars.max_size - items[i].width()
            }
        }
        if i > 0 {
            if horizontal {
                items[i].left = items[i - 1].left + items[i - 1].width() + spacing;
            } else {
                items[i].top = items[i - 1].top + items[i - 1].height() + spacing;
            }
        }
    }

    for i in (last_magnified + 1..items.len()).rev() {
        if horizontal {
            items[i].left = if i == items.len() - 1 {
                vars.max_width - spacing / 2 - items[i].min_width()
            } else {
                items[i + 1].left - items[i].min_width() - spacing
            };
        } else {
            items[i].top = if i == items.len() - 1 {
                vars.max_height - spacing / 2 - items[i].min_height()
            } else {
                items[i + 1].top - items[i].min_height() - spacing
            };
        }
    }

    if first_magnified == Some(0) && last_magnified < items.len() - 1 {
        for i in (0..=last_magnified).rev() {
            if horizontal {
                items[i].left = items[i + 1].left - items[i].width() - spacing;
            } else {
                items[i].top = items[i + 1].top - items[i].height() - spacing;
            }
        }
    }
}
