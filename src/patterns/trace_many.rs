//! Lapis Lazuli: the ring is flooded with the first colour, then pairs of
//! opposite lights are traced over it in two alternating colours.

use super::geometry::wrap_light;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

/// Delay units after each trace
const TRACE: u32 = 2;

pub struct TraceMany;

impl TraceMany {
    pub const NAME: &'static str = "trace_many";
}

impl Pattern for TraceMany {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn prelude(&mut self, stage: &mut Stage, script: &mut Script) {
        for slot in 0..LIGHT_COUNT {
            script.set(slot, stage.colour(0));
        }
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        // Half the palette, but never a modulus of zero
        let half = (stage.colour_count() / 2).max(1);
        for i in 0..LIGHT_COUNT {
            for j in 0..LIGHT_COUNT / 2 {
                script.set(wrap_light(i + j * 2), stage.colour((i + 1) % half));
                script.wait(TRACE);
                script.set(wrap_light(i + j * 2 + 8), stage.colour(i + 2));
                script.wait(TRACE);
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
    use crate::LIGHT_COUNT;
    use std::time::Duration;

    #[test]
    fn test_flood_comes_first() {
        let mut run = scheduler("9", &["#0000FF", "#FF0000", "#00FF00"], 4);
        let events = record(&mut run, 4);
        let flood = &events[0];
        assert_eq!(flood.mutations.len(), LIGHT_COUNT);
        assert!(flood.mutations.iter().all(|m| m.colour.to_string() == "#0000FF"));
        assert!(events[1..].iter().all(|e| e.mutations.len() == 1));
        assert_eq!(events[2].at - events[1].at, Duration::from_millis(8));

        // Opposite light, third colour along
        assert_eq!(events[2].mutations[0].slot, 8);
        assert_eq!(events[2].mutations[0].colour.to_string(), "#00FF00");
    }

    #[test]
    fn test_flood_is_not_repeated() {
        let mut run = scheduler("9", &["#0000FF"], 1);
        let events = record(&mut run, 1 + 2 * 16 * 8 * 2);
        assert_eq!(run.cycles(), 2);
        let floods = events.iter().filter(|e| e.mutations.len() == LIGHT_COUNT).count();
        assert_eq!(floods, 1);
    }
}
