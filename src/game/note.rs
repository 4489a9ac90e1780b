use crate::chart::Lane;

/// Visual progress past the hit line at which an unhit note counts as
/// missed (hit line sits at y = 1.0).
pub const MISS_OVERSHOOT_Y: f32 = 1.2;
/// Per-tick alpha decay while a hit or missed note fades out.
const FADE_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteState {
    #[default]
    Inactive,
    Falling,
    Hit,
    Missed,
}

/// One reusable note slot: lane, target hit time and the vocabulary key
/// it carries, plus derived fall position and fade alpha.
///
/// Gameplay state lives in `state`; pool occupancy lives in `in_use` and
/// is only ever flipped by the pool.
#[derive(Debug, Clone)]
pub struct Note {
    lane: Lane,
    target_time_ms: i64,
    vocab_key: String,
    glitch: bool,
    state: NoteState,
    y: f32,
    alpha: f32,
    in_use: bool,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            lane: Lane::C,
            target_time_ms: 0,
            vocab_key: String::new(),
            glitch: false,
            state: NoteState::Inactive,
            y: 0.0,
            alpha: 1.0,
            in_use: false,
        }
    }
}

impl Note {
    /// Initialize this slot for a fresh fall. The key buffer is reused,
    /// so re-spawning does not allocate once the slot has seen a key of
    /// similar length.
    pub(crate) fn activate(&mut self, lane: Lane, target_time_ms: i64, vocab_key: &str, glitch: bool) {
        self.lane = lane;
        self.target_time_ms = target_time_ms;
        self.vocab_key.clear();
        self.vocab_key.push_str(vocab_key);
        self.glitch = glitch;
        self.state = NoteState::Falling;
        self.y = 0.0;
        self.alpha = 1.0;
    }

    pub(crate) fn clear(&mut self) {
        self.lane = Lane::C;
        self.target_time_ms = 0;
        self.vocab_key.clear();
        self.glitch = false;
        self.state = NoteState::Inactive;
        self.y = 0.0;
        self.alpha = 1.0;
    }

    pub fn mark_hit(&mut self) {
        self.state = NoteState::Hit;
    }

    pub(crate) fn set_in_use(&mut self, in_use: bool) {
        self.in_use = in_use;
    }

    /// Advance fall position and fade for the current game time.
    ///
    /// Returns `true` while the note still matters to gameplay or
    /// rendering. A `false` return with state `Missed` is the one-time
    /// fresh-miss signal; a `false` return with state `Inactive` means
    /// the fade finished and the slot is ready to recycle.
    pub fn update(&mut self, current_time_ms: i64, approach_time_ms: i64) -> bool {
        if self.state == NoteState::Inactive {
            return false;
        }

        let time_until_hit = self.target_time_ms - current_time_ms;
        self.y = 1.0 - time_until_hit as f32 / approach_time_ms as f32;

        if self.state == NoteState::Falling && self.y > MISS_OVERSHOOT_Y {
            self.state = NoteState::Missed;
            return false;
        }

        if matches!(self.state, NoteState::Hit | NoteState::Missed) {
            self.alpha -= FADE_STEP;
            if self.alpha <= 0.0 {
                self.state = NoteState::Inactive;
                return false;
            }
        }

        true
    }

    pub fn lane(&self) -> Lane {
        self.lane
    }

    pub fn target_time_ms(&self) -> i64 {
        self.target_time_ms
    }

    pub fn vocab_key(&self) -> &str {
        &self.vocab_key
    }

    /// True when this slot carries a review word instead of the charted one.
    pub fn is_glitch(&self) -> bool {
        self.glitch
    }

    pub fn state(&self) -> NoteState {
        self.state
    }

    /// Fall progress: 0 at spawn, 1 at the hit line.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_in_use(&self) -> bool {
        self.in_use
    }

    pub fn is_falling(&self) -> bool {
        self.state == NoteState::Falling
    }

    pub fn is_hit(&self) -> bool {
        self.state == NoteState::Hit
    }

    pub fn is_missed(&self) -> bool {
        self.state == NoteState::Missed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn falling_note(target_time_ms: i64) -> Note {
        let mut note = Note::default();
        note.activate(Lane::E, target_time_ms, "star", false);
        note
    }

    #[test]
    fn test_fall_position() {
        let mut note = falling_note(2000);

        assert!(note.update(0, 2000));
        assert!((note.y() - 0.0).abs() < 1e-6);

        assert!(note.update(1000, 2000));
        assert!((note.y() - 0.5).abs() < 1e-6);

        assert!(note.update(2000, 2000));
        assert!((note.y() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_miss_past_overshoot() {
        let mut note = falling_note(2000);

        // Exactly 20% past the hit line is still alive.
        assert!(note.update(2400, 2000));
        assert!(note.is_falling());

        // One millisecond later it is gone, and the false return is the
        // fresh-miss signal.
        assert!(!note.update(2401, 2000));
        assert!(note.is_missed());
    }

    #[test]
    fn test_fade_out_after_hit() {
        let mut note = falling_note(2000);
        note.mark_hit();

        let mut ticks = 0;
        while note.update(2000, 2000) {
            ticks += 1;
            assert!(ticks < 20, "fade never completed");
        }
        assert_eq!(note.state(), NoteState::Inactive);
        // 1.0 alpha at 0.1 per tick: nine surviving ticks, gone on the tenth.
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_missed_note_fades_like_hit() {
        let mut note = falling_note(1000);
        assert!(!note.update(1500, 1000)); // fresh miss at y = 1.5

        let mut ticks = 0;
        while note.update(1500, 1000) {
            ticks += 1;
        }
        assert_eq!(note.state(), NoteState::Inactive);
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_activate_resets_fade() {
        let mut note = falling_note(1000);
        note.mark_hit();
        note.update(1000, 1000);
        note.update(1000, 1000);
        assert!(note.alpha() < 1.0);

        note.activate(Lane::G, 3000, "moon", true);
        assert!((note.alpha() - 1.0).abs() < 1e-6);
        assert!(note.is_falling());
        assert!(note.is_glitch());
        assert_eq!(note.vocab_key(), "moon");
    }
}
