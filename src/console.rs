//! Prints the ring to the terminal as a row of coloured dots, one line per
//! change.

use crate::led::LedUpdate;
use colored::*;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub fn render(leds: &LedUpdate) -> String {
    leds.leds
        .iter()
        .map(|colour| {
            if colour.is_off() {
                "·".dimmed().to_string()
            } else {
                let [r, g, b] = colour.0;
                "●".truecolor(r, g, b).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print every snapshot until the sender goes away
pub fn start(mut rx: watch::Receiver<LedUpdate>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let leds = *rx.borrow_and_update();
            println!("{} {}", "[ring]".bright_blue().bold(), render(&leds));
        }
    })
}
