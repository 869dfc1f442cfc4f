//! The ordered palette a run cycles through.  Its length (the colour count)
//! is independent of the number of lights, and patterns lean on that to make
//! the colours drift around the ring.

use crate::common_structs::Colour;
use crate::error::InvalidInput;

/// A non-empty list of colours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    pub fn new(colours: Vec<Colour>) -> Result<Self, InvalidInput> {
        if colours.is_empty() {
            return Err(InvalidInput::EmptyPalette);
        }
        Ok(Self { colours })
    }

    /// Build a palette from `#RRGGBB` strings
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, InvalidInput> {
        let colours = hex
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Colour>, _>>()?;
        Self::new(colours)
    }

    /// Number of colours.  Never zero.
    pub fn colour_count(&self) -> usize {
        self.colours.len()
    }

    /// The colour at `index` modulo the colour count
    pub fn cycle(&self, index: usize) -> Colour {
        self.colours[index % self.colours.len()]
    }

    pub fn get(&self, index: usize) -> Option<Colour> {
        self.colours.get(index).copied()
    }

    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(Palette::new(vec![]), Err(InvalidInput::EmptyPalette));
        assert_eq!(
            Palette::from_hex(&["#FF0000", "nope"]),
            Err(InvalidInput::MalformedColour("nope".to_string()))
        );

        let palette = Palette::from_hex(&["#FF0000", "#00FF00", "#0000FF"]).unwrap();
        assert_eq!(palette.colour_count(), 3);
        assert_eq!(palette.cycle(0), Colour::new(255, 0, 0));
        assert_eq!(palette.cycle(4), Colour::new(0, 255, 0));
        assert_eq!(palette.cycle(17), Colour::new(0, 0, 255));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_single_colour_palette_cycles() {
        let palette = Palette::from_hex(&["#123456"]).unwrap();
        for i in 0..40 {
            assert_eq!(palette.cycle(i), Colour::new(0x12, 0x34, 0x56));
        }
    }
}
