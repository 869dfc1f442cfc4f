//! Smolder: the Blender layout, painted once and never revisited.  Reachable
//! as id "6" or by name.

use super::blender::paint_wrapped;
use super::{Pattern, Stage};
use crate::script::Script;

pub struct Still;

impl Still {
    pub const NAME: &'static str = "still";
}

impl Pattern for Still {
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
