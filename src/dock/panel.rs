use std::time::Duration;

use crate::config::{ConfigError, PanelConfig};
use crate::wm::{PanelVisibility, ScreenGeometry, StackOrder, WindowServer};

use super::animation::{StepAnimation, TickOutcome, TransitionKind};
use super::item::{ClickAction, DockItem, DockItemKind};
use super::layout::{apply_cursor_layout, apply_rest_layout, LayoutVars};

/// One dock panel: owns its items, its layout state and its animation, and
/// drives the host window system as a side effect of pointer events and
/// animation ticks.
///
/// All methods run on the caller's thread; the panel performs no scheduling
/// of its own. The host forwards pointer events and calls [`DockPanel::tick`]
/// at [`DockPanel::tick_interval`] while an animation is active (idle ticks
/// are free).
#[derive(Debug)]
pub struct DockPanel<W: WindowServer> {
    wm: W,
    config: PanelConfig,
    screen: ScreenGeometry,
    items: Vec<DockItem>,
    vars: LayoutVars,
    animation: StepAnimation,

    background_width: i32,
    background_height: i32,
    window_width: i32,
    window_height: i32,
    /// Window origin of the rest-state geometry; external popups (menus,
    /// tooltips) anchor against this rather than the animated window.
    min_x: i32,
    min_y: i32,

    is_minimized: bool,
    is_entering: bool,
    is_leaving: bool,
}

impl<W: WindowServer> DockPanel<W> {
    pub fn new(
        config: PanelConfig,
        screen: ScreenGeometry,
        kinds: Vec<DockItemKind>,
        wm: W,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let items = build_items(&config, kinds);
        let vars = layout_vars(&config, &items);
        let mut panel = Self {
            wm,
            config,
            screen,
            items,
            vars,
            animation: StepAnimation::new(config.animation_steps),
            background_width: 0,
            background_height: 0,
            window_width: 0,
            window_height: 0,
            min_x: 0,
            min_y: 0,
            is_minimized: true,
            is_entering: false,
            is_leaving: false,
        };

        panel.update_layout_rest();
        panel.update_strut();
        panel.update_stack_order();
        Ok(panel)
    }

    /// Tear down and rebuild the item strip; called when launchers or
    /// component toggles change.
    pub fn reload(&mut self, kinds: Vec<DockItemKind>) {
        self.animation.cancel();
        self.is_entering = false;
        self.is_leaving = false;
        self.items = build_items(&self.config, kinds);
        self.vars = layout_vars(&self.config, &self.items);
        self.update_layout_rest();
        self.update_strut();
    }

    pub fn tick_interval(&self) -> Duration {
        StepAnimation::tick_interval(self.config.animation_speed)
    }

    pub fn items(&self) -> &[DockItem] {
        &self.items
    }

    pub fn layout_vars(&self) -> &LayoutVars {
        &self.vars
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn background(&self) -> (i32, i32) {
        (self.background_width, self.background_height)
    }

    pub fn window_size(&self) -> (i32, i32) {
        (self.window_width, self.window_height)
    }

    /// Origin of the minimized window, for anchoring external popups.
    pub fn min_origin(&self) -> (i32, i32) {
        (self.min_x, self.min_y)
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_animation_active(&self) -> bool {
        self.animation.is_active()
    }

    pub fn window_server(&self) -> &W {
        &self.wm
    }

    pub fn window_server_mut(&mut self) -> &mut W {
        &mut self.wm
    }

    /// Pointer crossed into the panel window. A leave animation still in
    /// flight is cancelled; the next move re-snapshots from the live
    /// (partially-animated) geometry so there is no visual jump.
    pub fn pointer_entered(&mut self) {
        if self.animation.transition() == Some(TransitionKind::Leaving) {
            self.animation.cancel();
            self.is_leaving = false;
        }
        self.is_entering = true;
        if self.config.visibility == PanelVisibility::WindowsCanCover {
            self.wm.set_stack_order(StackOrder::KeepAbove);
        }
    }

    /// Pointer moved inside the panel. Dropped while a step animation is
    /// running; the animation owns the geometry until its terminal step.
    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        if self.animation.is_active() {
            return;
        }
        self.update_layout_cursor(x, y);
    }

    /// Pointer left the panel bounds.
    pub fn pointer_left(&mut self) {
        if self.config.visibility == PanelVisibility::WindowsCanCover {
            self.wm.set_stack_order(StackOrder::KeepBelow);
        }
        if self.is_minimized {
            return;
        }
        self.is_leaving = true;
        self.update_layout_rest();
    }

    /// Click dispatch: locate the item under the pointer and return its
    /// action for the host to execute. Dropped during animations.
    pub fn pointer_pressed(&mut self, x: i32, y: i32) -> Option<ClickAction> {
        if self.animation.is_active() {
            return None;
        }
        let index = self.find_active_item(x, y)?;
        self.items[index].kind.on_click()
    }

    /// Advance the animation by one frame, if one is armed.
    pub fn tick(&mut self) {
        match self.animation.tick(&mut self.items) {
            TickOutcome::Idle => {}
            TickOutcome::Stepped { background } => {
                (self.background_width, self.background_height) = background;
                self.wm.request_redraw();
            }
            TickOutcome::Finished { kind, background } => {
                (self.background_width, self.background_height) = background;
                if kind == TransitionKind::Leaving {
                    // land idempotently in the rest layout
                    self.is_leaving = false;
                    self.update_layout_rest();
                }
                self.wm.request_redraw();
            }
        }
    }

    /// Rest layout. When a leave gesture armed `is_leaving`, this doubles as
    /// the leave-transition setup: start snapshots come from the live
    /// geometry, end snapshots from the freshly computed rest geometry
    /// translated into the maximized window's coordinates.
    fn update_layout_rest(&mut self) {
        let distance = self.vars.slot_distance();
        let start_background = if self.is_leaving {
            for item in &mut self.items {
                item.set_animation_start_as_current();
            }
            if self.vars.is_horizontal() {
                (self.background_width, distance)
            } else {
                (distance, self.background_height)
            }
        } else {
            (0, 0)
        };

        let background = apply_rest_layout(&self.vars, &mut self.items);
        (self.background_width, self.background_height) = background;

        if self.is_leaving {
            let (dx, dy) = self.vars.rest_to_hover_translation();
            for item in &mut self.items {
                item.end_size = item.size;
                item.end_left = item.left + dx;
                item.end_top = item.top + dy;
            }
            let end_background = self.vars.rest_background();
            self.animation.arm(
                TransitionKind::Leaving,
                &mut self.items,
                start_background,
                end_background,
            );
            (self.background_width, self.background_height) = start_background;
        } else {
            self.resize(self.vars.min_width, self.vars.min_height);
            self.is_minimized = true;
            self.wm.request_redraw();
        }
    }

    /// Cursor-driven layout. The first move after entering arms the entering
    /// transition: start snapshots are the pre-move geometry (translated into
    /// the maximized window when coming from rest), end snapshots the
    /// magnified geometry under the cursor.
    fn update_layout_cursor(&mut self, x: i32, y: i32) {
        if self.items.is_empty() {
            return;
        }

        let start_background = if self.is_entering {
            // When a cancelled leave left us mid-animation the geometry is
            // already in maximized-window coordinates; only a rest-state
            // origin needs translating.
            let (dx, dy) = if self.is_minimized {
                self.vars.rest_to_hover_translation()
            } else {
                (0, 0)
            };
            for item in &mut self.items {
                item.start_size = item.size;
                item.start_left = item.left + dx;
                item.start_top = item.top + dy;
            }
            if self.is_minimized {
                self.vars.rest_background()
            } else {
                (self.background_width, self.background_height)
            }
        } else {
            (0, 0)
        };

        // Prior frame's window extent: reproduces the original re-centering
        // behavior, one frame behind under fast motion.
        let window_extent = if self.vars.is_horizontal() {
            self.window_width
        } else {
            self.window_height
        };
        apply_cursor_layout(&self.vars, &mut self.items, (x, y), window_extent);

        if self.is_entering {
            for item in &mut self.items {
                item.set_animation_end_as_current();
            }
            let end_background = self.vars.hover_background();
            self.animation.arm(
                TransitionKind::Entering,
                &mut self.items,
                start_background,
                end_background,
            );
            (self.background_width, self.background_height) = start_background;
            self.is_entering = false;
        } else {
            (self.background_width, self.background_height) = self.vars.hover_background();
        }

        self.resize(self.vars.max_width, self.vars.max_height);
        self.is_minimized = false;
        self.wm.request_redraw();
    }

    /// Apply a window geometry: centered along the non-anchored axis, flush
    /// against the anchored edge, offset into the panel's screen.
    fn resize(&mut self, width: i32, height: i32) {
        use crate::wm::PanelPosition::*;
        let (x, y) = match self.config.position {
            Top => ((self.screen.width - width) / 2, 0),
            Bottom => (
                (self.screen.width - width) / 2,
                self.screen.height - height,
            ),
            Left => (0, (self.screen.height - height) / 2),
            Right => (
                self.screen.width - width,
                (self.screen.height - height) / 2,
            ),
        };
        self.wm.resize_window(width, height);
        self.wm.move_window(x + self.screen.x, y + self.screen.y);
        if width == self.vars.min_width && height == self.vars.min_height {
            self.min_x = x + self.screen.x;
            self.min_y = y + self.screen.y;
        }
        self.window_width = width;
        self.window_height = height;
    }

    /// Reserve screen edge space according to the visibility policy.
    fn update_strut(&mut self) {
        let thickness = match self.config.visibility {
            PanelVisibility::AlwaysVisible => {
                if self.vars.is_horizontal() {
                    self.vars.min_height
                } else {
                    self.vars.min_width
                }
            }
            PanelVisibility::AutoHide | PanelVisibility::WindowsCanCover => 1,
            PanelVisibility::WindowsGoBelow => 0,
        };
        self.wm.reserve_edge(self.config.position, thickness);
    }

    fn update_stack_order(&mut self) {
        let order = match self.config.visibility {
            PanelVisibility::WindowsCanCover => StackOrder::KeepBelow,
            _ => StackOrder::KeepAbove,
        };
        self.wm.set_stack_order(order);
    }

    /// Scan item positions along the motion axis for the slot under the
    /// pointer.
    fn find_active_item(&self, x: i32, y: i32) -> Option<usize> {
        let horizontal = self.vars.is_horizontal();
        let mut index = 0;
        while index < self.items.len()
            && ((horizontal && self.items[index].left < x)
                || (!horizontal && self.items[index].top < y))
        {
            index += 1;
        }
        index.checked_sub(1)
    }
}

fn build_items(config: &PanelConfig, kinds: Vec<DockItemKind>) -> Vec<DockItem> {
    let orientation = config.position.orientation();
    kinds
        .into_iter()
        .map(|kind| DockItem::new(kind, orientation, config.min_icon_size, config.max_icon_size))
        .collect()
}

fn layout_vars(config: &PanelConfig, items: &[DockItem]) -> LayoutVars {
    LayoutVars::compute(
        config.position,
        config.min_icon_size,
        config.max_icon_size,
        config.item_spacing(),
        config.auto_hide(),
        items,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wm::PanelPosition;

    /// Window server that records every operation for assertions.
    #[derive(Debug, Default)]
    struct RecordingServer {
        moves: Vec<(i32, i32)>,
        resizes: Vec<(i32, i32)>,
        struts: Vec<(PanelPosition, i32)>,
        stack_orders: Vec<StackOrder>,
        redraws: usize,
    }

    impl WindowServer for RecordingServer {
        fn move_window(&mut self, x: i32, y: i32) {
            self.moves.push((x, y));
        }
        fn resize_window(&mut self, width: i32, height: i32) {
            self.resizes.push((width, height));
        }
        fn reserve_edge(&mut self, edge: PanelPosition, thickness: i32) {
            self.struts.push((edge, thickness));
        }
        fn set_stack_order(&mut self, order: StackOrder) {
            self.stack_orders.push(order);
        }
        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn launcher(name: &str) -> DockItemKind {
        DockItemKind::Launcher {
            name: name.to_string(),
            icon: String::new(),
            command: name.to_string(),
        }
    }

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(0, 0, 1920, 1080)
    }

    fn config(position: PanelPosition, visibility: PanelVisibility) -> PanelConfig {
        PanelConfig {
            position,
            visibility,
            ..PanelConfig::default()
        }
    }

    fn bottom_panel(n: usize) -> DockPanel<RecordingServer> {
        let kinds = (0..n).map(|i| launcher(&format!("app{i}"))).collect();
        DockPanel::new(
            config(PanelPosition::Bottom, PanelVisibility::AlwaysVisible),
            screen(),
            kinds,
            RecordingServer::default(),
        )
        .unwrap()
    }

    #[test]
    fn construction_applies_rest_geometry_and_strut() {
        let panel = bottom_panel(3);
        assert!(panel.is_minimized());
        // 3 * (48 + 24) wide, min_size + spacing tall
        assert_eq!(panel.window_size(), (216, 72));
        let wm = panel.window_server();
        // centered horizontally, flush with the bottom edge
        assert_eq!(wm.moves.last(), Some(&((1920 - 216) / 2, 1080 - 72)));
        assert_eq!(wm.struts.last(), Some(&(PanelPosition::Bottom, 72)));
        assert_eq!(wm.stack_orders.last(), Some(&StackOrder::KeepAbove));
        assert_eq!(panel.min_origin(), ((1920 - 216) / 2, 1080 - 72));
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let bad = PanelConfig {
            min_icon_size: 0,
            ..PanelConfig::default()
        };
        let result = DockPanel::new(bad, screen(), vec![], RecordingServer::default());
        assert!(result.is_err());
    }

    #[test]
    fn strut_policy_follows_visibility() {
        for (visibility, expected) in [
            (PanelVisibility::AlwaysVisible, 72),
            (PanelVisibility::AutoHide, 1),
            (PanelVisibility::WindowsCanCover, 1),
            (PanelVisibility::WindowsGoBelow, 0),
        ] {
            let panel = DockPanel::new(
                config(PanelPosition::Bottom, visibility),
                screen(),
                vec![launcher("a")],
                RecordingServer::default(),
            )
            .unwrap();
            assert_eq!(
                panel.window_server().struts.last(),
                Some(&(PanelPosition::Bottom, expected)),
                "wrong strut for {visibility:?}"
            );
        }
    }

    #[test]
    fn windows_can_cover_panels_stay_below_until_entered() {
        let mut panel = DockPanel::new(
            config(PanelPosition::Bottom, PanelVisibility::WindowsCanCover),
            screen(),
            vec![launcher("a")],
            RecordingServer::default(),
        )
        .unwrap();
        assert_eq!(
            panel.window_server().stack_orders.last(),
            Some(&StackOrder::KeepBelow)
        );
        panel.pointer_entered();
        assert_eq!(
            panel.window_server().stack_orders.last(),
            Some(&StackOrder::KeepAbove)
        );
        panel.pointer_moved(10, 60);
        finish_animation(&mut panel);
        panel.pointer_left();
        assert_eq!(
            panel.window_server().stack_orders.last(),
            Some(&StackOrder::KeepBelow)
        );
    }

    fn finish_animation<W: WindowServer>(panel: &mut DockPanel<W>) {
        let mut guard = 0;
        while panel.is_animation_active() {
            panel.tick();
            guard += 1;
            assert!(guard < 100, "animation never terminated");
        }
    }

    #[test]
    fn first_move_after_enter_arms_the_entering_animation() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);

        assert!(panel.is_animation_active());
        assert!(!panel.is_minimized());
        // window already resized to the hover bounding box
        let vars = *panel.layout_vars();
        assert_eq!(panel.window_size(), (vars.max_width, vars.max_height));
        // background starts from rest and will interpolate up
        assert_eq!(panel.background(), vars.rest_background());
    }

    #[test]
    fn moves_during_an_animation_are_dropped() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);
        panel.tick();
        let snapshot: Vec<_> = panel.items().iter().map(|i| (i.left, i.size)).collect();

        panel.pointer_moved(center + 30, 60);
        let after: Vec<_> = panel.items().iter().map(|i| (i.left, i.size)).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn entering_animation_lands_exactly_on_the_magnified_geometry() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);

        let targets: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.end_left, i.end_top, i.end_size))
            .collect();
        finish_animation(&mut panel);

        let landed: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.left, i.top, i.size))
            .collect();
        assert_eq!(targets, landed);
        assert_eq!(panel.items()[1].size, 128);
        assert_eq!(panel.background(), panel.layout_vars().hover_background());
    }

    #[test]
    fn leave_returns_the_panel_to_rest() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);
        finish_animation(&mut panel);

        panel.pointer_left();
        assert!(panel.is_animation_active());
        finish_animation(&mut panel);

        assert!(panel.is_minimized());
        assert_eq!(panel.window_size(), (216, 72));
        for item in panel.items() {
            assert_eq!(item.size, 48);
            assert_eq!(item.top, 12);
        }
        assert_eq!(panel.background(), (216, 72));
    }

    #[test]
    fn leave_mid_entering_resnapshots_the_interpolated_geometry() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);

        // advance 5 of 20 frames, then leave
        for _ in 0..5 {
            panel.tick();
        }
        let mid: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.left, i.top, i.size))
            .collect();

        panel.pointer_left();
        let starts: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.start_left, i.start_top, i.start_size))
            .collect();
        assert_eq!(mid, starts);

        finish_animation(&mut panel);
        assert!(panel.is_minimized());
    }

    #[test]
    fn enter_mid_leave_cancels_and_resumes_from_live_geometry() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        let center = panel.items()[1].min_center;
        panel.pointer_moved(center, 60);
        finish_animation(&mut panel);

        panel.pointer_left();
        for _ in 0..5 {
            panel.tick();
        }
        let mid_sizes: Vec<_> = panel.items().iter().map(|i| i.size).collect();

        panel.pointer_entered();
        assert!(!panel.is_animation_active());

        // window is still at the hover extent, so the cursor coordinate is
        // shifted by half the growth relative to rest coordinates
        let vars = *panel.layout_vars();
        let shift = (vars.max_width - vars.min_width) / 2;
        panel.pointer_moved(center + shift, 60);
        let starts: Vec<_> = panel.items().iter().map(|i| i.start_size).collect();
        assert_eq!(mid_sizes, starts);

        finish_animation(&mut panel);
        assert_eq!(panel.items()[1].size, 128);
    }

    #[test]
    fn leave_while_minimized_is_a_no_op() {
        let mut panel = bottom_panel(3);
        let redraws_before = panel.window_server().redraws;
        panel.pointer_left();
        assert!(!panel.is_animation_active());
        assert!(panel.is_minimized());
        assert_eq!(panel.window_server().redraws, redraws_before);
    }

    #[test]
    fn click_returns_the_item_action() {
        let mut panel = bottom_panel(3);
        // item 1 rest slot starts at left = 84
        let x = panel.items()[1].left + 10;
        let action = panel.pointer_pressed(x, 60);
        assert_eq!(
            action,
            Some(ClickAction::Launch {
                command: "app1".to_string()
            })
        );
        // left of the first item: no hit
        assert_eq!(panel.pointer_pressed(0, 60), None);
    }

    #[test]
    fn clicks_during_an_animation_are_dropped() {
        let mut panel = bottom_panel(3);
        panel.pointer_entered();
        panel.pointer_moved(100, 60);
        assert!(panel.is_animation_active());
        assert_eq!(panel.pointer_pressed(100, 60), None);
    }

    #[test]
    fn empty_panel_degenerates_without_errors() {
        let mut panel = bottom_panel(0);
        assert_eq!(panel.window_size(), (0, 72));
        panel.pointer_entered();
        panel.pointer_moved(10, 10);
        panel.pointer_left();
        panel.tick();
        assert_eq!(panel.pointer_pressed(10, 10), None);
    }

    #[test]
    fn vertical_panel_anchors_to_the_right_edge() {
        let kinds = vec![launcher("a"), launcher("b")];
        let panel = DockPanel::new(
            config(PanelPosition::Right, PanelVisibility::AlwaysVisible),
            screen(),
            kinds,
            RecordingServer::default(),
        )
        .unwrap();
        // 2 * (48 + 24) tall, 72 wide, flush right and vertically centered
        assert_eq!(panel.window_size(), (72, 144));
        assert_eq!(
            panel.window_server().moves.last(),
            Some(&(1920 - 72, (1080 - 144) / 2))
        );
        assert_eq!(
            panel.window_server().struts.last(),
            Some(&(PanelPosition::Right, 72))
        );
    }

    #[test]
    fn screen_origin_offsets_the_window_position() {
        let panel = DockPanel::new(
            config(PanelPosition::Bottom, PanelVisibility::AlwaysVisible),
            ScreenGeometry::new(1920, 0, 1280, 1024),
            vec![launcher("a")],
            RecordingServer::default(),
        )
        .unwrap();
        let (x, y) = *panel.window_server().moves.last().unwrap();
        assert_eq!(x, 1920 + (1280 - 72) / 2);
        assert_eq!(y, 1024 - 72);
    }

    #[test]
    fn reload_rebuilds_the_strip() {
        let mut panel = bottom_panel(2);
        assert_eq!(panel.window_size(), (144, 72));
        panel.reload(vec![launcher("a"), launcher("b"), launcher("c")]);
        assert_eq!(panel.items().len(), 3);
        assert_eq!(panel.window_size(), (216, 72));
        assert!(panel.is_minimized());
    }

    #[test]
    fn rest_layout_is_stable_across_full_cycles() {
        let mut panel = bottom_panel(4);
        let rest: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.left, i.top, i.size))
            .collect();

        for _ in 0..3 {
            panel.pointer_entered();
            let center = panel.items()[2].min_center;
            panel.pointer_moved(center, 60);
            finish_animation(&mut panel);
            panel.pointer_left();
            finish_animation(&mut panel);
        }

        let after: Vec<_> = panel
            .items()
            .iter()
            .map(|i| (i.left, i.top, i.size))
            .collect();
        assert_eq!(rest, after);
    }
}
