//! Feel the Funk: groups of four random lights strobe on, then groups of
//! four random lights go dark.  The colour a light gets depends on where it
//! landed, shifted further along the palette each pass.

use super::geometry::wrap_light;
use super::{Pattern, Stage};
use crate::script::Script;

/// Groups per half of a block
const GROUPS: usize = 12;
/// Lights per group
const FLASHES: usize = 4;
/// Blocks per palette colour
const BLOCKS: usize = 2;
/// Delay units after each group
const GROUP_REST: u32 = 12;

pub struct FeelTheFunk;

impl FeelTheFunk {
    pub const NAME: &'static str = "feel_the_funk";

    /// Four random lights, one delay unit apart.  `colorer` is `None` when
    /// the lights are being switched off.
    fn group(stage: &mut Stage, script: &mut Script, colorer: Option<usize>) {
        for flash in 0..FLASHES {
            if flash > 0 {
                script.wait(1);
            }
            let slot = wrap_light(stage.draw_light() + 1);
            match colorer {
                Some(colorer) => script.set(slot, stage.colour(slot + colorer)),
                None => script.clear(slot),
            };
        }
        script.wait(GROUP_REST);
    }
}

impl Pattern for FeelTheFunk {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for colorer in 0..stage.colour_count() {
            for _ in 0..BLOCKS {
                for _ in 0..GROUPS {
                    Self::group(stage, script, Some(colorer));
                }
                for _ in 0..GROUPS {
                    Self::group(stage, script, None);
                }
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}
