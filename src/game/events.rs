use crate::chart::Lane;

use super::JudgeResult;

/// Engine-to-host notification, queued during `update`/`judge_key_press`
/// and drained by the host once per tick. Queuing instead of calling
/// back keeps handlers from re-entering engine or pool state mid-update.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    NoteSpawned {
        slot: usize,
        lane: Lane,
        target_time_ms: i64,
        vocab_key: String,
        glitch: bool,
    },
    NoteHit(JudgeResult),
    NoteMissed {
        slot: usize,
        lane: Lane,
        vocab_key: String,
    },
    ComboChanged(u32),
    ProgressChanged(f32),
    SongComplete {
        score: u32,
        stars: u8,
    },
}
