//! Async driver for a panel: multiplexes pointer events from the host with
//! the fixed-step animation timer on one task.

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::dock::{ClickAction, DockPanel};
use crate::wm::WindowServer;

/// Pointer events the host forwards to a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Pointer crossed into the panel window.
    Entered,
    /// Pointer moved inside the panel, in window-local coordinates.
    Moved { x: i32, y: i32 },
    /// Pointer left the panel window.
    Left,
    /// Button press inside the panel, in window-local coordinates.
    Pressed { x: i32, y: i32 },
}

/// Run a panel's event loop until the event channel closes, then hand the
/// panel back.
///
/// The animation timer ticks at the panel's configured interval; idle ticks
/// are no-ops, so there is no separate arm/disarm protocol. Click actions are
/// handed to `on_action` for the host to execute.
pub async fn drive<W>(
    mut panel: DockPanel<W>,
    mut events: mpsc::Receiver<PointerEvent>,
    mut on_action: impl FnMut(ClickAction),
) -> DockPanel<W>
where
    W: WindowServer,
{
    let mut ticker = tokio::time::interval(panel.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                panel.tick();
            }
            event = events.recv() => match event {
                Some(PointerEvent::Entered) => panel.pointer_entered(),
                Some(PointerEvent::Moved { x, y }) => panel.pointer_moved(x, y),
                Some(PointerEvent::Left) => panel.pointer_left(),
                Some(PointerEvent::Pressed { x, y }) => {
                    if let Some(action) = panel.pointer_pressed(x, y) {
                        on_action(action);
                    }
                }
                None => break,
            },
        }
    }

    panel
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PanelConfig;
    use crate::dock::DockItemKind;
    use crate::wm::{HeadlessWindowServer, ScreenGeometry};
    use std::time::Duration;

    fn panel() -> DockPanel<HeadlessWindowServer> {
        let kinds = (0..3)
            .map(|i| DockItemKind::Launcher {
                name: format!("app{i}"),
                icon: String::new(),
                command: format!("app{i}"),
            })
            .collect();
        DockPanel::new(
            PanelConfig::default(),
            ScreenGeometry::new(0, 0, 1920, 1080),
            kinds,
            HeadlessWindowServer::new(),
        )
        .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn full_gesture_cycle_lands_back_at_rest() {
        let panel = panel();
        let center = panel.items()[1].min_center;
        let interval = panel.tick_interval();

        let (events_tx, events_rx) = mpsc::channel(16);
        let (actions_tx, mut actions_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(drive(panel, events_rx, move |action| {
            let _ = actions_tx.send(action);
        }));

        // click while at rest, over the middle item
        events_tx
            .send(PointerEvent::Pressed { x: center, y: 60 })
            .await
            .unwrap();

        events_tx.send(PointerEvent::Entered).await.unwrap();
        events_tx
            .send(PointerEvent::Moved { x: center, y: 60 })
            .await
            .unwrap();
        // more than 20 ticks: the entering animation completes
        tokio::time::sleep(interval * 25).await;

        events_tx.send(PointerEvent::Left).await.unwrap();
        tokio::time::sleep(interval * 25).await;

        drop(events_tx);
        let panel = handle.await.unwrap();

        assert!(panel.is_minimized());
        assert!(!panel.is_animation_active());
        assert_eq!(panel.window_size(), (216, 72));
        assert_eq!(
            actions_rx.try_recv().ok(),
            Some(ClickAction::Launch {
                command: "app1".to_string()
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_channel_stops_the_loop() {
        let panel = panel();
        let (events_tx, events_rx) = mpsc::channel(4);
        let handle = tokio::spawn(drive(panel, events_rx, |_| {}));

        events_tx.send(PointerEvent::Entered).await.unwrap();
        drop(events_tx);

        let panel = handle.await.unwrap();
        assert!(panel.is_minimized());
    }
}
