use crate::chart::Lane;

use super::note::Note;

/// Slots preallocated for a session before any growth.
pub const NOMINAL_POOL_CAPACITY: usize = 50;

/// Bounded arena of reusable note slots.
///
/// Slots are allocated up front and addressed by stable index, so the
/// per-frame spawn/judge/recycle path never touches the heap. When every
/// slot is busy the pool grows one slot at a time up to twice its nominal
/// capacity; past that, spawns are dropped and counted.
#[derive(Debug)]
pub struct NotePool {
    slots: Vec<Note>,
    free: Vec<usize>,
    ceiling: usize,
    dropped_spawns: u64,
}

impl NotePool {
    pub fn new(nominal_capacity: usize) -> Self {
        let slots: Vec<Note> = (0..nominal_capacity).map(|_| Note::default()).collect();
        let free: Vec<usize> = (0..nominal_capacity).rev().collect();
        Self {
            slots,
            free,
            ceiling: nominal_capacity * 2,
            dropped_spawns: 0,
        }
    }

    /// Claim a free slot, growing below the ceiling. Returns `None` (and
    /// counts the drop) once the ceiling is reached.
    pub fn obtain(&mut self) -> Option<usize> {
        if let Some(slot) = self.free.pop() {
            self.slots[slot].set_in_use(true);
            return Some(slot);
        }

        if self.slots.len() < self.ceiling {
            let slot = self.slots.len();
            let mut note = Note::default();
            note.set_in_use(true);
            self.slots.push(note);
            return Some(slot);
        }

        self.dropped_spawns += 1;
        None
    }

    /// Claim a slot and initialize it straight into the falling state.
    pub fn obtain_with(
        &mut self,
        lane: Lane,
        target_time_ms: i64,
        vocab_key: &str,
        glitch: bool,
    ) -> Option<usize> {
        let slot = self.obtain()?;
        self.slots[slot].activate(lane, target_time_ms, vocab_key, glitch);
        Some(slot)
    }

    /// Return a slot to the free list, whatever state it is in.
    /// Idempotent: recycling a free or unknown slot does nothing.
    pub fn recycle(&mut self, slot: usize) {
        let Some(note) = self.slots.get_mut(slot) else {
            return;
        };
        if !note.is_in_use() {
            return;
        }
        note.clear();
        note.set_in_use(false);
        self.free.push(slot);
    }

    /// Free every slot. Slots gained through growth are kept.
    pub fn reset(&mut self) {
        for note in &mut self.slots {
            note.clear();
            note.set_in_use(false);
        }
        self.free = (0..self.slots.len()).rev().collect();
        self.dropped_spawns = 0;
    }

    pub fn get(&self, slot: usize) -> Option<&Note> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Note> {
        self.slots.get_mut(slot)
    }

    /// In-use, still-falling notes with their slot indices, for judging
    /// and rendering.
    pub fn active_notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, note)| note.is_in_use() && note.is_falling())
    }

    /// Every slot, including free ones, for rendering fades.
    pub fn notes(&self) -> &[Note] {
        &self.slots
    }

    /// Current slot count (nominal capacity plus any growth).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn active_count(&self) -> usize {
        self.active_notes().count()
    }

    pub fn in_use_count(&self) -> usize {
        self.slots.iter().filter(|note| note.is_in_use()).count()
    }

    /// Spawns dropped because the pool was at its growth ceiling.
    pub fn dropped_spawns(&self) -> u64 {
        self.dropped_spawns
    }
}

impl Default for NotePool {
    fn default() -> Self {
        Self::new(NOMINAL_POOL_CAPACITY)
    }
}
