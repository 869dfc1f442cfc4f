//! Cortez: a three-light window steps around the ring, strobing quickly in
//! its own colours and then slowly in the next colours along.

use super::strobe::Strobe;
use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;
use static_assertions::const_assert;

const FAST: Strobe = Strobe {
    width: 3,
    on: 1,
    off: 1,
};
const SLOW: Strobe = Strobe {
    width: 3,
    on: 2,
    off: 2,
};

const_assert!(FAST.width < LIGHT_COUNT);

pub struct Cortez;

impl Cortez {
    pub const NAME: &'static str = "cortez";
}

impl Pattern for Cortez {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for j in 0..LIGHT_COUNT {
            for _ in 0..4 {
                FAST.flash(stage, script, j + 1, |li| li);
            }
            for _ in 0..2 {
                SLOW.flash(stage, script, j + 1, |li| li + 1);
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
    use std::time::Duration;

    #[test]
    fn test_window_steps_around() {
        let events = record(&mut scheduler("5", &["#FF0000", "#00FF00"], 10), 16 * 12);
        let first: Vec<usize> = events[0].mutations.iter().map(|m| m.slot).collect();
        assert_eq!(first, vec![1, 2, 3]);
        // The slow strobe shifts the colours by one
        assert_eq!(events[8].mutations[0].colour, events[0].mutations[1].colour);
        assert_eq!(events[9].at - events[8].at, Duration::from_millis(20));

        let last: Vec<usize> = events[15 * 12].mutations.iter().map(|m| m.slot).collect();
        assert_eq!(last, vec![0, 1, 2]);
    }
}
