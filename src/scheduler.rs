//! The Scheduler turns a pattern's scripts into a stream of ticks.  It has no
//! clock of its own: the run controller asks for the next tick, applies frames
//! and sleeps through waits.  This keeps every pattern testable on virtual
//! time.

use crate::led::Mutation;
use crate::palette::Palette;
use crate::patterns::{Pattern, Stage};
use crate::random::RandomSource;
use crate::script::{Script, Step};
use crate::timing::Timing;
use log::{debug, error};
use std::collections::VecDeque;
use std::time::Duration;

/// What the run should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Apply these writes as one batch
    Frame(Vec<Mutation>),
    /// Suspend for this long
    Wait(Duration),
    /// Nothing more will ever be written.  Wait to be cancelled.
    Hold,
}

enum SchedulerState {
    /// Nothing written yet.  The prelude and the first cycle come next.
    Prelude,
    /// Replaying cycles, one after another
    Cycling,
    /// Finished painting, only the queue is left to drain
    Holding,
}

pub struct Scheduler {
    pattern: Box<dyn Pattern>,
    palette: Palette,
    timing: Timing,
    rng: Box<dyn RandomSource>,
    state: SchedulerState,

    /// Steps of the current cycle not yet handed out
    queue: VecDeque<Step>,

    /// Number of cycles written so far
    cycles: usize,
}

impl Scheduler {
    pub fn new(
        pattern: Box<dyn Pattern>,
        palette: Palette,
        timing: Timing,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            pattern,
            palette,
            timing,
            rng,
            state: SchedulerState::Prelude,
            queue: VecDeque::new(),
            cycles: 0,
        }
    }

    pub fn next_tick(&mut self) -> Tick {
        loop {
            if let Some(step) = self.queue.pop_front() {
                return match step {
                    Step::Batch(mutations) => Tick::Frame(mutations),
                    Step::Wait(beats) => Tick::Wait(self.timing.wait(beats)),
                };
            }

            match self.state {
                SchedulerState::Prelude => {
                    let mut prelude = Script::default();
                    let mut stage = Stage::new(&self.palette, self.rng.as_mut());
                    self.pattern.prelude(&mut stage, &mut prelude);
                    self.queue.extend(prelude.into_steps());
                    self.state = SchedulerState::Cycling;
                    if !self.write_cycle() {
                        self.state = SchedulerState::Holding;
                    }
                }
                SchedulerState::Cycling => {
                    if !self.write_cycle() {
                        self.state = SchedulerState::Holding;
                    }
                }
                SchedulerState::Holding => return Tick::Hold,
            }
        }
    }

    /// Queue up one more cycle.  Returns false if the pattern has nothing
    /// more to say after it.
    fn write_cycle(&mut self) -> bool {
        let mut script = Script::default();
        let mut stage = Stage::new(&self.palette, self.rng.as_mut());
        self.pattern.cycle(&mut stage, &mut script);
        self.cycles += 1;

        let name = self.pattern.get_name();
        let keep_going = if self.pattern.is_static() {
            false
        } else if !script.has_wait() {
            // Replaying this would never yield to the clock
            error!("Pattern {} wrote a cycle with no waits, holding.", name);
            false
        } else {
            true
        };

        debug!(
            "Pattern {} cycle {}: {} steps",
            name,
            self.cycles,
            script.steps().len()
        );
        self.queue.extend(script.into_steps());
        keep_going
    }

    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, SchedulerState::Holding) && self.queue.is_empty()
    }

    pub fn pattern_name(&self) -> &'static str {
        self.pattern.get_name()
    }
}
