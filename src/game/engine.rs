use log::{debug, info};

use crate::chart::{Lane, Lesson};
use crate::config::PlayerProfile;

use super::note::NoteState;
use super::pool::NOMINAL_POOL_CAPACITY;
use super::{EngineEvent, JudgeResult, JudgeWindow, Judgment, NotePool, ScoreBoard, SessionSummary};

/// Lead time when no tier config supplies a tempo.
const DEFAULT_APPROACH_TIME_MS: i64 = 2000;
/// Notes lead their target time by two beats.
const APPROACH_BEATS: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Ready,
    Playing,
    Completed,
}

/// Core gameplay orchestrator: consumes a lesson chart and tier config,
/// spawns notes through the pool each tick, judges key presses against
/// the active notes, and tracks score, combo and progress to completion.
///
/// Single-writer: every call must come from the tick timeline. Input
/// arriving from elsewhere has to be marshalled onto it before
/// `judge_key_press` is invoked.
pub struct RhythmEngine {
    pool: NotePool,
    lesson: Option<Lesson>,
    window: JudgeWindow,
    approach_time_ms: i64,
    glitch_interval: u32,
    glitch_vocabs: Vec<String>,
    glitch_cursor: usize,
    notes_since_glitch: u32,
    spawn_cursor: usize,
    phase: SessionPhase,
    session_start_ms: i64,
    board: ScoreBoard,
    progress: f32,
    total_notes: u32,
    events: Vec<EngineEvent>,
}

impl RhythmEngine {
    pub fn new() -> Self {
        Self::with_pool_capacity(NOMINAL_POOL_CAPACITY)
    }

    pub fn with_pool_capacity(nominal_capacity: usize) -> Self {
        Self {
            pool: NotePool::new(nominal_capacity),
            lesson: None,
            window: JudgeWindow::default(),
            approach_time_ms: DEFAULT_APPROACH_TIME_MS,
            glitch_interval: 0,
            glitch_vocabs: Vec::new(),
            glitch_cursor: 0,
            notes_since_glitch: 0,
            spawn_cursor: 0,
            phase: SessionPhase::Idle,
            session_start_ms: 0,
            board: ScoreBoard::new(),
            progress: 0.0,
            total_notes: 0,
            events: Vec::new(),
        }
    }

    /// Set up a new play session. Timing comes from the lesson's tier
    /// config for the player's age group when present, otherwise from
    /// the profile's group defaults.
    pub fn initialize(&mut self, lesson: Lesson, profile: &PlayerProfile) {
        self.reset();

        match lesson.config_for_age(profile.age_group) {
            Some(config) => {
                self.window = JudgeWindow::from_age_config(config);
                self.glitch_interval = config.glitch_note_interval;
                if config.bpm > 0 {
                    self.approach_time_ms =
                        (60_000.0 / config.bpm as f64 * APPROACH_BEATS) as i64;
                }
            }
            None => {
                self.window = JudgeWindow::for_group(profile.age_group);
                self.glitch_interval = profile.age_group.glitch_note_interval();
            }
        }

        self.total_notes = lesson.note_count() as u32;
        info!(
            "session ready: lesson={} notes={} approach={}ms perfect=±{}ms good=±{}ms",
            lesson.lesson_id,
            self.total_notes,
            self.approach_time_ms,
            self.window.perfect_ms,
            self.window.good_ms
        );
        self.lesson = Some(lesson);
        self.phase = SessionPhase::Ready;
    }

    /// Return the engine to idle: every pool slot freed, counters and
    /// pending events cleared. Safe to call in any phase.
    pub fn reset(&mut self) {
        self.pool.reset();
        self.lesson = None;
        self.window = JudgeWindow::default();
        self.approach_time_ms = DEFAULT_APPROACH_TIME_MS;
        self.glitch_interval = 0;
        self.glitch_cursor = 0;
        self.notes_since_glitch = 0;
        self.spawn_cursor = 0;
        self.phase = SessionPhase::Idle;
        self.session_start_ms = 0;
        self.board.reset();
        self.progress = 0.0;
        self.total_notes = 0;
        self.events.clear();
    }

    /// Supply review vocabulary for glitch-note substitution. Content
    /// selection only; judgment is unaffected.
    pub fn set_glitch_vocabs(&mut self, vocabs: Vec<String>) {
        self.glitch_vocabs = vocabs;
        self.glitch_cursor = 0;
    }

    /// Begin playback at the given game time. No-op unless initialized.
    pub fn start(&mut self, game_time_ms: i64) {
        if self.phase != SessionPhase::Ready {
            debug!("start ignored in phase {:?}", self.phase);
            return;
        }
        self.session_start_ms = game_time_ms;
        self.phase = SessionPhase::Playing;
    }

    /// Per-tick drive: spawn due notes, advance falling ones (detecting
    /// fresh misses), refresh progress and finalize on completion.
    /// No-op unless playing.
    pub fn update(&mut self, game_time_ms: i64) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.spawn_due_notes(game_time_ms);
        self.advance_notes(game_time_ms);
        self.refresh_progress();
    }

    fn spawn_due_notes(&mut self, game_time_ms: i64) {
        let Self {
            lesson: Some(lesson),
            pool,
            events,
            spawn_cursor,
            glitch_vocabs,
            glitch_cursor,
            notes_since_glitch,
            approach_time_ms,
            glitch_interval,
            ..
        } = self
        else {
            return;
        };

        while let Some(event) = lesson.note_events.get(*spawn_cursor) {
            if event.time_ms - *approach_time_ms > game_time_ms {
                break;
            }
            *spawn_cursor += 1;
            *notes_since_glitch += 1;

            let mut vocab_key: &str = &event.vocab_key;
            let mut glitch = false;
            if *glitch_interval > 0
                && !glitch_vocabs.is_empty()
                && *notes_since_glitch >= *glitch_interval
            {
                vocab_key = &glitch_vocabs[*glitch_cursor % glitch_vocabs.len()];
                *glitch_cursor += 1;
                *notes_since_glitch = 0;
                glitch = true;
            }

            match pool.obtain_with(event.lane, event.time_ms, vocab_key, glitch) {
                Some(slot) => events.push(EngineEvent::NoteSpawned {
                    slot,
                    lane: event.lane,
                    target_time_ms: event.time_ms,
                    vocab_key: vocab_key.to_string(),
                    glitch,
                }),
                None => debug!(
                    "pool at ceiling, dropped spawn for {} at {}ms",
                    event.lane.name(),
                    event.time_ms
                ),
            }
        }
    }

    fn advance_notes(&mut self, game_time_ms: i64) {
        let approach_time_ms = self.approach_time_ms;
        for slot in 0..self.pool.len() {
            let Some(note) = self.pool.get_mut(slot) else {
                continue;
            };
            if !note.is_in_use() {
                continue;
            }
            if note.update(game_time_ms, approach_time_ms) {
                continue;
            }
            if note.is_missed() {
                // The false return on the Falling -> Missed transition
                // fires exactly once per note.
                let lane = note.lane();
                let vocab_key = note.vocab_key().to_string();
                self.board.record_miss();
                self.events.push(EngineEvent::NoteMissed {
                    slot,
                    lane,
                    vocab_key,
                });
                self.events.push(EngineEvent::ComboChanged(0));
            } else if note.state() == NoteState::Inactive {
                self.pool.recycle(slot);
            }
        }
    }

    /// Judge a key press against the active notes in `lane`: the note
    /// closest to the press time wins, provided it is inside the good
    /// window. Returns the inert `None` result when nothing qualifies or
    /// the engine is not playing.
    pub fn judge_key_press(&mut self, lane: Lane, press_time_ms: i64) -> JudgeResult {
        if self.phase != SessionPhase::Playing {
            return JudgeResult::none();
        }

        let mut best: Option<(usize, i64)> = None;
        for (slot, note) in self.pool.active_notes() {
            if note.lane() != lane {
                continue;
            }
            let diff_abs = (press_time_ms - note.target_time_ms()).abs();
            if !self.window.contains(diff_abs) {
                continue;
            }
            match best {
                Some((_, best_diff)) if best_diff <= diff_abs => {}
                _ => best = Some((slot, diff_abs)),
            }
        }

        let Some((slot, diff_abs)) = best else {
            return JudgeResult::none();
        };
        let Some(note) = self.pool.get_mut(slot) else {
            return JudgeResult::none();
        };

        let timing_diff_ms = press_time_ms - note.target_time_ms();
        let judgment = if diff_abs <= self.window.perfect_ms {
            Judgment::Perfect
        } else {
            Judgment::Good
        };

        note.mark_hit();
        let result = JudgeResult::new(judgment, lane, timing_diff_ms, note.vocab_key().to_string())
            .glitch(note.is_glitch());

        let contribution = self.board.record_hit(judgment);
        debug!(
            "{:?} on {} diff={}ms +{} (combo {})",
            judgment,
            lane.name(),
            timing_diff_ms,
            contribution,
            self.board.combo
        );

        self.events.push(EngineEvent::NoteHit(result.clone()));
        self.events.push(EngineEvent::ComboChanged(self.board.combo));
        self.refresh_progress();

        result
    }

    fn refresh_progress(&mut self) {
        if self.total_notes == 0 {
            return;
        }
        let counted = self.board.counted();
        let progress = counted as f32 / self.total_notes as f32;
        if progress != self.progress {
            self.progress = progress;
            self.events.push(EngineEvent::ProgressChanged(progress));
            if counted >= self.total_notes {
                self.finish_session();
            }
        }
    }

    fn finish_session(&mut self) {
        if self.phase == SessionPhase::Completed {
            return;
        }
        self.phase = SessionPhase::Completed;
        let stars = self.board.stars(self.total_notes);
        info!(
            "song complete: score={} stars={} max_combo={} accuracy={:.1}%",
            self.board.score,
            stars,
            self.board.max_combo,
            self.board.accuracy()
        );
        self.events.push(EngineEvent::SongComplete {
            score: self.board.score,
            stars,
        });
    }

    /// Take every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Final figures for the session as it stands.
    pub fn summary(&self) -> SessionSummary {
        let (lesson_id, title) = self
            .lesson
            .as_ref()
            .map(|lesson| (lesson.lesson_id.clone(), lesson.title.clone()))
            .unwrap_or_default();
        SessionSummary {
            lesson_id,
            title,
            score: self.board.score,
            stars: self.board.stars(self.total_notes),
            max_combo: self.board.max_combo,
            perfect_count: self.board.perfect_count,
            good_count: self.board.good_count,
            miss_count: self.board.miss_count,
            total_notes: self.total_notes,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    pub fn combo(&self) -> u32 {
        self.board.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.board.max_combo
    }

    pub fn perfect_count(&self) -> u32 {
        self.board.perfect_count
    }

    pub fn good_count(&self) -> u32 {
        self.board.good_count
    }

    pub fn miss_count(&self) -> u32 {
        self.board.miss_count
    }

    /// Chart completion fraction, 0 to 1.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn total_notes(&self) -> u32 {
        self.total_notes
    }

    /// Chart events spawned so far.
    pub fn spawned_count(&self) -> usize {
        self.spawn_cursor
    }

    pub fn approach_time_ms(&self) -> i64 {
        self.approach_time_ms
    }

    pub fn window(&self) -> &JudgeWindow {
        &self.window
    }

    pub fn session_start_ms(&self) -> i64 {
        self.session_start_ms
    }

    /// The note arena, for rendering.
    pub fn pool(&self) -> &NotePool {
        &self.pool
    }
}

impl Default for RhythmEngine {
    fn default() -> Self {
        Self::new()
    }
}
