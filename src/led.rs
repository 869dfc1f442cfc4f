//! The LED state vector: sixteen colour slots that exactly one run at a time
//! may write into, plus the channels observers use to follow it.

use crate::common_structs::Colour;
use log::{debug, error};
use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;

/// Number of lights on the ring
pub const LIGHT_COUNT: usize = 16;

/// How many applied batches a slow frame subscriber may fall behind by
const FRAME_BACKLOG: usize = 1024;

/// A snapshot of every slot on the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedUpdate {
    pub leds: [Colour; LIGHT_COUNT],
}

impl Default for LedUpdate {
    fn default() -> Self {
        Self {
            leds: [Colour::OFF; LIGHT_COUNT],
        }
    }
}

impl LedUpdate {
    /// True if every slot is off
    pub fn is_dark(&self) -> bool {
        self.leds.iter().all(Colour::is_off)
    }
}

/// A single write to a single slot.  Clearing a slot writes `Colour::OFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mutation {
    pub slot: usize,
    pub colour: Colour,
}

impl Mutation {
    pub fn set(slot: usize, colour: Colour) -> Self {
        Self { slot, colour }
    }

    pub fn clear(slot: usize) -> Self {
        Self {
            slot,
            colour: Colour::OFF,
        }
    }
}

/// A batch that made it onto the ring, as seen by frame subscribers
#[derive(Debug, Clone)]
pub struct Frame {
    /// Id of the run that wrote it
    pub run: u64,
    pub at: Instant,
    pub mutations: Vec<Mutation>,
    /// The ring after the batch was applied
    pub leds: LedUpdate,
}

/// Outcome of offering a batch to the vector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The run that offered the batch is no longer bound to this vector, so
    /// the batch was dropped
    StaleRunIgnored,
}

/// The mutable ring.  Lives behind the run controller's mutex; binding a run
/// and writing a batch both happen with that lock held, which is what keeps a
/// replaced run from ever writing over its successor.
#[derive(Debug)]
pub struct LedVector {
    leds: LedUpdate,
    bound_run: Option<u64>,
    snapshots: watch::Sender<LedUpdate>,
    frames: broadcast::Sender<Frame>,
}

impl Default for LedVector {
    fn default() -> Self {
        Self::new()
    }
}

impl LedVector {
    pub fn new() -> Self {
        let (snapshots, _) = watch::channel(LedUpdate::default());
        let (frames, _) = broadcast::channel(FRAME_BACKLOG);
        Self {
            leds: LedUpdate::default(),
            bound_run: None,
            snapshots,
            frames,
        }
    }

    /// Hand the vector to `run`, blanking whatever the previous run left
    pub fn bind(&mut self, run: u64) {
        self.bound_run = Some(run);
        self.blank();
    }

    /// Release the vector if `run` holds it.  Returns true if it did, in
    /// which case the ring has been blanked.
    pub fn unbind(&mut self, run: u64) -> bool {
        if self.bound_run != Some(run) {
            return false;
        }
        self.bound_run = None;
        self.blank();
        true
    }

    pub fn bound_run(&self) -> Option<u64> {
        self.bound_run
    }

    /// Apply a batch on behalf of `run`.  All of the batch lands before the
    /// new snapshot is published.
    pub fn apply(&mut self, run: u64, mutations: &[Mutation]) -> Applied {
        if self.bound_run != Some(run) {
            debug!("Dropping {} writes from stale run {}", mutations.len(), run);
            return Applied::StaleRunIgnored;
        }

        for mutation in mutations {
            match self.leds.leds.get_mut(mutation.slot) {
                Some(led) => *led = mutation.colour,
                None => error!("LED slot {} out of range.", mutation.slot),
            }
        }

        self.snapshots.send_replace(self.leds);
        // Nobody listening is fine
        let _ = self.frames.send(Frame {
            run,
            at: Instant::now(),
            mutations: mutations.to_vec(),
            leds: self.leds,
        });
        Applied::Applied
    }

    pub fn snapshot(&self) -> LedUpdate {
        self.leds
    }

    /// Follow the latest state of the ring
    pub fn subscribe(&self) -> watch::Receiver<LedUpdate> {
        self.snapshots.subscribe()
    }

    /// Receive every applied batch
    pub fn subscribe_frames(&self) -> broadcast::Receiver<Frame> {
        self.frames.subscribe()
    }

    fn blank(&mut self) {
        self.leds = LedUpdate::default();
        self.snapshots.send_replace(self.leds);
    }
}
