//! Previews a setting on a simulated ring.  Frames go to the terminal and,
//! if enabled, to websocket clients.  Ctrl-C blanks the ring and exits.

use anyhow::{Context, Result};
use ledring::patterns::PATTERNS;
use ledring::random::SeededRandom;
use ledring::settings::PreviewSettings;
use ledring::{console, ws_server, RunController, Setting};
use log::info;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = PreviewSettings::load("settings").context("Failed to load settings.toml")?;
    let setting = Setting::try_from(settings.setting.clone()).context("Bad [setting] table")?;

    let controller = RunController::with_tick(settings.tick());
    let console = if settings.console {
        Some(console::start(controller.subscribe()))
    } else {
        info!("Console output disabled.");
        None
    };
    let ws = if settings.ws_server {
        Some(ws_server::start_server(settings.ws_port, controller.subscribe()))
    } else {
        info!("Websocket server disabled.");
        None
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })?;

    play(&controller, &setting, settings.seed)?;

    if settings.jukebox_secs > 0 {
        info!("Loading jukebox mode.");
        let mut interval = tokio::time::interval(Duration::from_secs(settings.jukebox_secs));
        // The first tick completes straight away
        interval.tick().await;
        for descriptor in PATTERNS.iter().cycle() {
            tokio::select! {
                _ = interval.tick() => {
                    info!("Jukebox: {}", descriptor.title);
                    let setting = Setting {
                        flashing_pattern: descriptor.id.to_string(),
                        ..setting.clone()
                    };
                    play(&controller, &setting, settings.seed)?;
                }
                _ = rx.recv() => break,
            }
        }
    } else {
        rx.recv().await;
    }

    info!("Shutting down, blanking the ring.");
    controller.stop();
    for task in [console, ws].into_iter().flatten() {
        task.abort();
    }
    Ok(())
}

fn play(controller: &RunController, setting: &Setting, seed: Option<u64>) -> Result<()> {
    let handle = match seed {
        Some(seed) => controller.start_with_rng(
            &setting.name,
            &setting.colors,
            setting.delay_time,
            &setting.flashing_pattern,
            Box::new(SeededRandom::new(seed)),
        )?,
        None => controller.start_setting(setting)?,
    };
    info!(
        "Playing {} for setting {:?}",
        handle.pattern_name(),
        handle.setting_id()
    );
    Ok(())
}
