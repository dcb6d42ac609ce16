use std::time::Duration;

use super::item::DockItem;

/// Direction of an armed enter/leave transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Rest geometry growing toward the hover geometry.
    Entering,
    /// Hover geometry shrinking back to rest.
    Leaving,
}

/// Result of advancing the animation by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No animation armed; nothing changed.
    Idle,
    /// One interpolation frame applied.
    Stepped { background: (i32, i32) },
    /// Terminal step reached; the timer must be disarmed.
    Finished {
        kind: TransitionKind,
        background: (i32, i32),
    },
}

/// Fixed-step interpolation between two panel geometries.
///
/// Items carry their own start/end snapshots; this driver owns the step
/// counter and the background plate interpolation. Exactly one transition is
/// active at a time. Re-arming (a pointer gesture cancelling the in-flight
/// transition) restarts the counter from zero; callers snapshot start state
/// from the live geometry so there is no visual discontinuity.
#[derive(Debug, Clone)]
pub struct StepAnimation {
    num_steps: i32,
    current_step: i32,
    active: Option<TransitionKind>,
    start_background: (i32, i32),
    end_background: (i32, i32),
}

impl StepAnimation {
    pub fn new(num_steps: i32) -> Self {
        Self {
            num_steps,
            current_step: 0,
            active: None,
            start_background: (0, 0),
            end_background: (0, 0),
        }
    }

    /// Tick interval for a configured animation speed (0..32).
    pub fn tick_interval(speed: i32) -> Duration {
        Duration::from_millis((32 - speed).max(1) as u64)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn transition(&self) -> Option<TransitionKind> {
        self.active
    }

    pub fn current_step(&self) -> i32 {
        self.current_step
    }

    pub fn num_steps(&self) -> i32 {
        self.num_steps
    }

    /// Arm a transition. Items must already carry their start/end snapshots;
    /// this resets the step counter and starts each item's interpolator.
    pub fn arm(
        &mut self,
        kind: TransitionKind,
        items: &mut [DockItem],
        start_background: (i32, i32),
        end_background: (i32, i32),
    ) {
        for item in items.iter_mut() {
            item.start_animation(self.num_steps);
        }
        self.current_step = 0;
        self.active = Some(kind);
        self.start_background = start_background;
        self.end_background = end_background;
    }

    /// Drop the in-flight transition without applying further frames. Ticks
    /// from the cancelled sequence can no longer land.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Advance one frame: step every item and interpolate the background.
    pub fn tick(&mut self, items: &mut [DockItem]) -> TickOutcome {
        let Some(kind) = self.active else {
            return TickOutcome::Idle;
        };

        for item in items.iter_mut() {
            item.next_animation_step();
        }
        self.current_step += 1;
        let background = (
            self.start_background.0
                + (self.end_background.0 - self.start_background.0) * self.current_step
                    / self.num_steps,
            self.start_background.1
                + (self.end_background.1 - self.start_background.1) * self.current_step
                    / self.num_steps,
        );

        if self.current_step == self.num_steps {
            self.active = None;
            TickOutcome::Finished { kind, background }
        } else {
            TickOutcome::Stepped { background }
        }
    }
}
