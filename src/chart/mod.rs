mod lane;
mod lesson;
mod loader;

pub use lane::{LANE_COUNT, Lane};
pub use lesson::{AgeConfig, Lesson, NoteEvent, VocabItem};
pub use loader::{LessonError, LessonLoader};
