//! Berghain Bitte: five lights and five colours march backwards around the
//! ring together, one light at a time.

use super::geometry::consecutive;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

/// Lights (and colours) in the marching group
const GROUP: usize = 5;
/// Delay units each light stays lit
const HOLD: u32 = 2;

pub struct Techno;

impl Techno {
    pub const NAME: &'static str = "techno";
}

impl Pattern for Techno {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        let colour_count = stage.colour_count();
        for i in 0..colour_count {
            let shades = consecutive::<GROUP>(i, colour_count);
            for j in (0..LIGHT_COUNT).rev() {
                let lights = consecutive::<GROUP>(j, LIGHT_COUNT);
                for _ in 0..2 {
                    for (light, shade) in lights.into_iter().zip(shades) {
                        script.set(light, stage.colour(shade)).wait(HOLD).clear(light);
                    }
                }
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}
