//! Scripts: one cycle of a pattern written out as batches of writes and the
//! waits between them.  Writes with no wait between them land together as a
//! single batch.

use crate::common_structs::Colour;
use crate::led::Mutation;
use crate::timing::Beats;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Writes applied together
    Batch(Vec<Mutation>),
    /// Suspend for some number of delay units
    Wait(Beats),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn set(&mut self, slot: usize, colour: Colour) -> &mut Self {
        self.push(Mutation::set(slot, colour))
    }

    pub fn clear(&mut self, slot: usize) -> &mut Self {
        self.push(Mutation::clear(slot))
    }

    /// Wait a whole number of delay units
    pub fn wait(&mut self, multiple: u32) -> &mut Self {
        self.wait_beats(Beats::whole(multiple))
    }

    pub fn wait_beats(&mut self, beats: Beats) -> &mut Self {
        if !beats.is_zero() {
            self.steps.push(Step::Wait(beats));
        }
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn has_wait(&self) -> bool {
        self.steps.iter().any(|step| matches!(step, Step::Wait(_)))
    }

    fn push(&mut self, mutation: Mutation) -> &mut Self {
        match self.steps.last_mut() {
            Some(Step::Batch(batch)) => batch.push(mutation),
            _ => self.steps.push(Step::Batch(vec![mutation])),
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_writes_between_waits_share_a_batch() {
        let red = Colour::new(255, 0, 0);
        let mut script = Script::default();
        assert!(script.is_empty());

        script.set(0, red).set(1, red).wait(2).clear(0).wait(0).clear(1);
        assert!(script.has_wait());
        assert_eq!(
            script.steps(),
            &[
                Step::Batch(vec![Mutation::set(0, red), Mutation::set(1, red)]),
                Step::Wait(Beats::whole(2)),
                Step::Batch(vec![Mutation::clear(0), Mutation::clear(1)]),
            ]
        );
    }
}
