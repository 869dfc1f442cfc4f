//! Colour Dots: what the ring shows for an unknown pattern.  Each palette
//! colour gets one light, in order, with no wrapping; any lights left over
//! stay dark.

use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

pub struct ColourDots;

impl ColourDots {
    pub const NAME: &'static str = "colour_dots";
}

impl Pattern for ColourDots {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for slot in 0..LIGHT_COUNT {
            match stage.palette().get(slot) {
                Some(colour) => script.set(slot, colour),
                None => script.clear(slot),
            };
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }

    fn is_static(&self) -> bool {
        true
    }
}
