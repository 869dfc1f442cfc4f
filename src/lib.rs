//! Simulates the flashing patterns of a sixteen light ring.  A
//! `RunController` plays one pattern at a time into an LED vector that
//! observers can follow frame by frame.

pub mod common_structs;
pub mod console;
pub mod error;
pub mod led;
pub mod palette;
pub mod patterns;
pub mod random;
pub mod run_controller;
pub mod scheduler;
pub mod script;
pub mod settings;
pub mod timing;
pub mod ws_server;

pub use common_structs::{Colour, Setting};
pub use error::{EngineError, InvalidInput};
pub use led::{LedUpdate, LIGHT_COUNT};
pub use run_controller::{RunController, RunHandle};
