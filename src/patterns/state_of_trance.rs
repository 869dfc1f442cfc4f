//! State of Trance: a window chases ahead of its anchor four times, then
//! the anchored window pulses twice with its colours rotated by the anchor.

use super::strobe::Strobe;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

const CHASE: Strobe = Strobe {
    width: 3,
    on: 1,
    off: 1,
};
const PULSE: Strobe = Strobe {
    width: 3,
    on: 2,
    off: 1,
};

pub struct StateOfTrance;

impl StateOfTrance {
    pub const NAME: &'static str = "state_of_trance";
}

impl Pattern for StateOfTrance {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for j in 0..LIGHT_COUNT {
            for i in 0..4 {
                CHASE.flash(stage, script, j + i + 1, |li| li);
            }
            for _ in 0..2 {
                PULSE.flash(stage, script, j + 1, |li| li + j);
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}
