//! Medusa: a three-light window steps around the ring, changing colour with
//! every flash.

use super::strobe::Strobe;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

const STROBE: Strobe = Strobe {
    width: 3,
    on: 1,
    off: 2,
};

/// Flashes per window position
const FLASHES: usize = 4;

pub struct Medusa;

impl Medusa {
    pub const NAME: &'static str = "medusa";
}

impl Pattern for Medusa {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for j in 0..LIGHT_COUNT {
            for r in 0..FLASHES {
                STROBE.flash(stage, script, j + 1, |li| li + r);
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod test {
    use crate::scheduler::recording::{record, scheduler};

    #[test]
    fn test_colour_changes_each_flash() {
        let palette = ["#FF0000", "#00FF00", "#0000FF", "#FFFFFF"];
        let events = record(&mut scheduler("10", &palette, 1), 8);
        let on: Vec<String> = events
            .iter()
            .step_by(2)
            .map(|e| e.mutations[0].colour.to_string())
            .collect();
        // Light 1 walks through the palette
        assert_eq!(on, vec!["#00FF00", "#0000FF", "#FFFFFF", "#FF0000"]);
    }
}
