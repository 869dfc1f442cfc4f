//! The strobe shared by the window patterns: light a run of adjacent lights,
//! hold, switch them off, hold again.

use super::geometry::window;
use super::Stage;
use crate::script::Script;

pub(super) struct Strobe {
    /// Lights in the window
    pub width: usize,
    /// Delay units the window stays lit
    pub on: u32,
    /// Delay units it stays dark afterwards
    pub off: u32,
}

impl Strobe {
    /// One flash of the window starting at `start`.  Each light `li` gets
    /// palette entry `colour_index(li)`, wrapped by the colour count.
    pub fn flash(
        &self,
        stage: &Stage,
        script: &mut Script,
        start: usize,
        colour_index: impl Fn(usize) -> usize,
    ) {
        let lights = window(start, self.width);
        for li in lights.clone() {
            script.set(li, stage.colour(colour_index(li)));
        }
        script.wait(self.on);
        for li in lights {
            script.clear(li);
        }
        script.wait(self.off);
    }
}
