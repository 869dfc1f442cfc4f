//! The Underground: the ring split into four blocks of four, each strobed
//! three times in turn.

use super::strobe::Strobe;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;
use static_assertions::const_assert_eq;

const STROBE: Strobe = Strobe {
    width: 4,
    on: 1,
    off: 3,
};

const_assert_eq!(LIGHT_COUNT % STROBE.width, 0);

pub struct Underground;

impl Underground {
    pub const NAME: &'static str = "underground";
}

impl Pattern for Underground {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for j in (0..LIGHT_COUNT).step_by(STROBE.width) {
            for _ in 0..3 {
                STROBE.flash(stage, script, j, |li| li);
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
    fn test_blocks() {
        let events = record(&mut scheduler("7", &["#FF0000", "#00FF00", "#0000FF"], 1), 24);
        let starts: Vec<usize> = events
            .iter()
            .step_by(6)
            .map(|e| e.mutations[0].slot)
            .collect();
        assert_eq!(starts, vec![0, 4, 8, 12]);
        assert!(events.iter().all(|e| e.mutations.len() == 4));
    }
}
