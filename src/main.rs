use std::time::Duration;

use tokio::sync::mpsc;

use smoothdock::config::{Config, ConfigError, PanelEntry};
use smoothdock::dock::{DockItemKind, DockPanel};
use smoothdock::scheduler::{drive, PointerEvent};
use smoothdock::wm::{HeadlessWindowServer, ScreenGeometry};

// The headless binary has no window-manager connection to ask.
const VIRTUAL_DESKTOPS: u32 = 4;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(env_filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("info")
            .compact()
            .init();
    }

    let screens = [ScreenGeometry::new(0, 0, 1920, 1080)];

    let panels = Config::with(|config| {
        config
            .panels
            .iter()
            .map(|entry| {
                let screen = entry.screen;
                (config.panel_config(entry), screen, panel_items(entry))
            })
            .collect::<Vec<_>>()
    });

    let mut tasks = Vec::new();
    for (panel_config, screen_index, kinds) in panels {
        let screen = *screens
            .get(screen_index)
            .ok_or(ConfigError::InvalidScreen(screen_index))?;
        let panel = DockPanel::new(panel_config, screen, kinds, HeadlessWindowServer::new())?;
        tracing::info!(
            position = ?panel_config.position,
            items = panel.items().len(),
            rest = ?panel.window_size(),
            "panel ready"
        );

        let (events_tx, events_rx) = mpsc::channel(64);
        let task = tokio::spawn(drive(panel, events_rx, |action| {
            tracing::info!(?action, "click dispatched");
        }));
        tasks.push((task, events_tx));
    }

    // Scripted pointer sweep so a headless run exercises a full
    // enter/track/leave gesture on every panel.
    for (_, events_tx) in &tasks {
        events_tx.send(PointerEvent::Entered).await?;
        for x in (0..400).step_by(24) {
            events_tx.send(PointerEvent::Moved { x, y: 60 }).await?;
            tokio::time::sleep(Duration::from_millis(33)).await;
        }
        events_tx.send(PointerEvent::Left).await?;
    }
    tokio::time::sleep(Duration::from_millis(700)).await;

    for (task, events_tx) in tasks {
        drop(events_tx);
        let panel = task.await?;
        tracing::info!(
            minimized = panel.is_minimized(),
            rest = ?panel.window_size(),
            origin = ?panel.min_origin(),
            "panel settled"
        );
    }

    Ok(())
}

/// Item strip for one configured panel, in display order.
fn panel_items(entry: &PanelEntry) -> Vec<DockItemKind> {
    let mut kinds = Vec::new();
    if entry.show_application_menu {
        kinds.push(DockItemKind::ApplicationMenu {
            label: "Applications".to_string(),
            icon: "start-here".to_string(),
        });
    }
    for launcher in &entry.launchers {
        kinds.push(DockItemKind::Launcher {
            name: launcher.name.clone(),
            icon: launcher.icon.clone(),
            command: launcher.command.clone(),
        });
    }
    if entry.show_pager {
        for desktop in 0..VIRTUAL_DESKTOPS {
            kinds.push(DockItemKind::Pager {
                desktop,
                screen_aspect: 16.0 / 9.0,
            });
        }
    }
    if entry.show_clock {
        kinds.push(DockItemKind::Clock);
    }
    kinds
}
