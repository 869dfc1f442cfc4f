//! Streams ring snapshots to websocket clients at `/ws` as JSON:
//! `{"leds": ["#RRGGBB", ...]}`.

use crate::led::LedUpdate;
use futures_util::SinkExt;
use log::{info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use warp::ws::{Message, WebSocket};
use warp::Filter;

pub fn start_server(port: u16, rx: watch::Receiver<LedUpdate>) -> JoinHandle<()> {
    // Each connection gets its own clone of the receiver
    let rx_filter = warp::any().map(move || rx.clone());

    let routes = warp::path("ws")
        .and(warp::ws())
        .and(rx_filter)
        .map(|ws: warp::ws::Ws, rx: watch::Receiver<LedUpdate>| {
            info!("Got connection to WS route, trying to upgrade...");
            ws.on_upgrade(move |socket| user_connected(socket, rx))
        });

    info!("Starting websocket listener on port {port}...");
    tokio::spawn(warp::serve(routes).run(([0, 0, 0, 0], port)))
}

async fn user_connected(mut ws: WebSocket, mut rx: watch::Receiver<LedUpdate>) {
    info!("New user connected.");

    loop {
        // The current state first, then every change
        let leds = *rx.borrow_and_update();
        let packet = match serde_json::to_string(&leds) {
            Ok(packet) => packet,
            Err(e) => {
                warn!("Could not encode LED update: {e}");
                break;
            }
        };

        if ws.send(Message::text(packet)).await.is_err() {
            info!("Client disconnected.");
            break;
        }

        if rx.changed().await.is_err() {
            break;
        }
    }
}
