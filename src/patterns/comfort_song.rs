//! The Piano Man: three tracks play in step, each walking the ring in its own
//! fixed order.  A note on every track lights together, holds for four
//! delay units, and goes dark for four more.

use super::{Pattern, Stage};
use crate::script::Script;
use crate::LIGHT_COUNT;
use static_assertions::const_assert_eq;

/// Order the first track visits the lights in
pub const PATTERN_INDICES: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];
/// Second track, starting a quarter turn and a step ahead
pub const PATTERN2_INDICES: [usize; 16] = [5, 9, 13, 1, 6, 10, 14, 2, 7, 11, 15, 3, 8, 12, 0, 4];
/// Third track
pub const PATTERN3_INDICES: [usize; 16] = [10, 14, 2, 6, 11, 15, 3, 7, 12, 0, 4, 8, 13, 1, 5, 9];

const_assert_eq!(PATTERN_INDICES.len(), LIGHT_COUNT);

const TRACKS: [&[usize; 16]; 3] = [&PATTERN_INDICES, &PATTERN2_INDICES, &PATTERN3_INDICES];

/// Times each note is played
const REPEATS: usize = 2;
/// Delay units a note is held, and the rest after it
const NOTE_LENGTH: u32 = 4;

pub struct ComfortSong;

impl ComfortSong {
    pub const NAME: &'static str = "comfort_song";
}

impl Pattern for ComfortSong {
    fn new() -> Box<dyn Pattern> {
        Box::new(Self)
    }

    fn cycle(&mut self, stage: &mut Stage, script: &mut Script) {
        for x in 0..stage.colour_count() {
            let position = x % LIGHT_COUNT;
            for _ in 0..REPEATS {
                for track in TRACKS {
                    script.set(track[position], stage.colour(position));
                }
                script.wait(NOTE_LENGTH);
                for track in TRACKS {
                    script.clear(track[position]);
                }
                script.wait(NOTE_LENGTH);
            }
        }
    }

    fn get_name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::scheduler::recording::{record, scheduler};
    use std::collections::HashSet;
    use std::time::Duration;

    #[test]
    fn test_tracks_never_collide() {
        for track in TRACKS {
            let slots: HashSet<_> = track.iter().collect();
            assert_eq!(slots.len(), LIGHT_COUNT);
        }
        for position in 0..LIGHT_COUNT {
            let slots: HashSet<_> = TRACKS.iter().map(|t| t[position]).collect();
            assert_eq!(slots.len(), 3);
        }
    }

    #[test]
    fn test_each_track_keeps_time() {
        let palette = ["#FF0000", "#00FF00", "#0000FF", "#FFFFFF"];
        let mut run = scheduler("2", &palette, 5);
        // Two full cycles
        let events = record(&mut run, 2 * 4 * REPEATS * 2);

        for track in 0..TRACKS.len() {
            let times: Vec<Duration> = events
                .iter()
                .filter(|e| e.mutations.len() > track)
                .map(|e| e.at)
                .collect();
            assert_eq!(times.len(), events.len());
            for pair in times.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::from_millis(20));
            }
        }

        // Second note of the first track
        let second_note = &events[2 * REPEATS].mutations[0];
        assert_eq!(second_note.slot, 4);
        assert_eq!(second_note.colour.to_string(), "#00FF00");
    }
}
