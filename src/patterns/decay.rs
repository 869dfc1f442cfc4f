//! Decay: a colour creeps around the ring two lights at a time with its
//! neighbours trailing behind, then the odd lights take the colour while
//! the ones after them fade out.

use super::geometry::wrap_light;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::timing::Beats;
use crate::LIGHT_COUNT;

/// The short pause between trailing writes
const SLIVER: Beats = Beats::fraction(1, 16);

/// Delay units between steps
const STEP: u32 = 3;

pub struct Decay;

impl Decay {
    pub const NAME: &'static str = "decay";
}

impl Pattern for Decay {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for xy in 0..stage.colour_count() {
            for j in (0..LIGHT_COUNT).step_by(2) {
                script.set(j, stage.colour(xy)).wait_beats(SLIVER);
                script.set(wrap_light(j + 1), stage.colour(xy + 1)).wait_beats(SLIVER);
                script.set(wrap_light(j + 2), stage.colour(xy + 2)).wait_beats(SLIVER);
                if j == 8 || j == 12 {
                    script.set(wrap_light(j), stage.colour(xy + 3)).wait_beats(SLIVER);
                }
                script.wait(STEP);
            }

            for j in (1..LIGHT_COUNT).step_by(2) {
                script.set(j, stage.colour(xy)).wait(STEP);
                script.clear(wrap_light(j + 1)).wait(STEP);
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}
