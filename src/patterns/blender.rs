//! Stuck in a Blender: the palette laid around the ring, repeating when it
//! runs out.  Static.

use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;

pub struct Blender;

impl Blender {
    pub const NAME: &'static str = "blender";
}

/// Slot `i` gets palette entry `i % colour_count`
pub(super) fn paint_wrapped(stage: &Stage, script: &mut Script) {
    for slot in 0..LIGHT_COUNT {
        script.set(slot, stage.colour(slot));
    }
}

impl Pattern for Blender {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        paint_wrapped(stage, script);
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }

    fn is_static(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod test {
    use crate::scheduler::recording::{record, scheduler};

    #[test]
    fn test_palette_repeats_around_the_ring() {
        let events = record(&mut scheduler("0", &["#FF0000", "#00FF00", "#0000FF"], 100), 5);
        assert_eq!(events.len(), 1);
        let colours: Vec<String> = events[0]
            .mutations
            .iter()
            .map(|m| m.colour.to_string())
            .collect();
        assert_eq!(colours[0], "#FF0000");
        assert_eq!(colours[4], "#00FF00");
        assert_eq!(colours[15], "#FF0000");
        assert!(events[0].mutations.iter().enumerate().all(|(i, m)| m.slot == i));
    }
}
