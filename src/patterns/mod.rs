//! The flashing patterns, and the registry that maps a setting's pattern
//! identifier onto one of them.

use crate::common_structs::Colour;
use crate::palette::Palette;
use crate::random::RandomSource;
use crate::script::Script;
use crate::LIGHT_COUNT;
use log::warn;

pub mod geometry;
mod strobe;

pub mod blender;
pub mod colour_dots;
pub mod comfort_song;
pub mod cortez;
pub mod decay;
pub mod feel_the_funk;
pub mod medusa;
pub mod state_of_trance;
pub mod still;
pub mod techno;
pub mod trace_many;
pub mod underground;

use blender::Blender;
use colour_dots::ColourDots;
use comfort_song::ComfortSong;
use cortez::Cortez;
use decay::Decay;
use feel_the_funk::FeelTheFunk;
use medusa::Medusa;
use state_of_trance::StateOfTrance;
use still::Still;
use techno::Techno;
use trace_many::TraceMany;
use underground::Underground;

/// Interface implemented by every pattern
pub trait Pattern: Send {
    /// Create a new instance of the pattern.  This is called once per run
    fn new() -> Box<dyn Pattern>
    where
        Self: Sized;

    /// Writes made once, before the first cycle of a run
    fn prelude(&mut self, _stage: &mut Stage, _script: &mut Script) {}

    /// Write out one full cycle of the pattern.  The scheduler replays
    /// cycles back to back for as long as the run lasts, asking for a fresh
    /// one each time, so patterns with random draws vary from cycle to cycle.
    fn cycle(&mut self, stage: &mut Stage, script: &mut Script);

    fn get_name(&self) -> &'static str;

    /// Static patterns paint once and then hold for the rest of the run
    fn is_static(&self) -> bool {
        false
    }
}

/// What a pattern can see while writing a cycle
pub struct Stage<'a> {
    palette: &'a Palette,
    rng: &'a mut dyn RandomSource,
}

impl<'a> Stage<'a> {
    pub fn new(palette: &'a Palette, rng: &'a mut dyn RandomSource) -> Self {
        Self { palette, rng }
    }

    pub fn palette(&self) -> &Palette {
        self.palette
    }

    /// The colour count, never zero
    pub fn colour_count(&self) -> usize {
        self.palette.colour_count()
    }

    /// Palette entry `index % colour_count`
    pub fn colour(&self, index: usize) -> Colour {
        self.palette.cycle(index)
    }

    /// A random light index in `0..LIGHT_COUNT`.  The source is trusted to
    /// honour the bound but the result is checked anyway.
    pub fn draw_light(&mut self) -> usize {
        let draw = self.rng.below(LIGHT_COUNT);
        if draw < LIGHT_COUNT {
            draw
        } else {
            warn!("Random source returned {draw} for a bound of {LIGHT_COUNT}, wrapping.");
            draw % LIGHT_COUNT
        }
    }
}

/// A registry entry
pub struct PatternDescriptor {
    /// Identifier stored in settings
    pub id: &'static str,
    /// Machine name, also accepted in place of the id
    pub name: &'static str,
    /// Name shown to people
    pub title: &'static str,
    pub factory: fn() -> Box<dyn Pattern>,
}

impl PatternDescriptor {
    pub fn build(&self) -> Box<dyn Pattern> {
        (self.factory)()
    }
}

pub static PATTERNS: [PatternDescriptor; 11] = [
    PatternDescriptor {
        id: "0",
        name: Blender::NAME,
        title: "Stuck in a Blender",
        factory: Blender::new,
    },
    PatternDescriptor {
        id: "2",
        name: ComfortSong::NAME,
        title: "The Piano Man",
        factory: ComfortSong::new,
    },
    PatternDescriptor {
        id: "3",
        name: FeelTheFunk::NAME,
        title: "Feel the Funk",
        factory: FeelTheFunk::new,
    },
    PatternDescriptor {
        id: "4",
        name: Decay::NAME,
        title: "Decay",
        factory: Decay::new,
    },
    PatternDescriptor {
        id: "5",
        name: Cortez::NAME,
        title: "Cortez",
        factory: Cortez::new,
    },
    PatternDescriptor {
        id: "6",
        name: Still::NAME,
        title: "Smolder",
        factory: Still::new,
    },
    PatternDescriptor {
        id: "7",
        name: Underground::NAME,
        title: "The Underground",
        factory: Underground::new,
    },
    PatternDescriptor {
        id: "8",
        name: Techno::NAME,
        title: "Berghain Bitte",
        factory: Techno::new,
    },
    PatternDescriptor {
        id: "9",
        name: TraceMany::NAME,
        title: "Lapis Lazuli",
        factory: TraceMany::new,
    },
    PatternDescriptor {
        id: "10",
        name: Medusa::NAME,
        title: "Medusa",
        factory: Medusa::new,
    },
    PatternDescriptor {
        id: "11",
        name: StateOfTrance::NAME,
        title: "State of Trance",
        factory: StateOfTrance::new,
    },
];

/// Played for any identifier the registry does not know
pub static FALLBACK: PatternDescriptor = PatternDescriptor {
    id: "",
    name: ColourDots::NAME,
    title: "Colour Dots",
    factory: ColourDots::new,
};

/// Look up a pattern by id, or by name ignoring case
pub fn pattern_by_name(id: &str) -> Option<&'static PatternDescriptor> {
    let id = id.trim();
    PATTERNS
        .iter()
        .find(|p| p.id == id || p.name.eq_ignore_ascii_case(id))
}

/// Like `pattern_by_name`, but unknown identifiers get the static
/// colour-dots rendering instead of an error
pub fn resolve(id: &str) -> &'static PatternDescriptor {
    pattern_by_name(id).unwrap_or_else(|| {
        warn!("Unknown pattern {id:?}, showing the palette without animation.");
        &FALLBACK
    })
}
