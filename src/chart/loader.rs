use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use super::Lesson;

#[derive(Debug, Error)]
pub enum LessonError {
    #[error("failed to read lesson file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lesson JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("lesson {0} has an empty note chart")]
    EmptyChart(String),
}

/// Loads lesson content from JSON and normalizes it for playback.
pub struct LessonLoader;

impl LessonLoader {
    pub fn load(path: &Path) -> Result<Lesson, LessonError> {
        let json = std::fs::read_to_string(path).map_err(|source| LessonError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a lesson from a JSON string. Note events are sorted by hit
    /// time so the spawner can rely on chart order; unknown vocab keys
    /// are reported but do not fail the load.
    pub fn from_json(json: &str) -> Result<Lesson, LessonError> {
        let mut lesson: Lesson = serde_json::from_str(json)?;

        if lesson.note_events.is_empty() {
            return Err(LessonError::EmptyChart(lesson.lesson_id));
        }

        lesson.note_events.sort_by_key(|event| event.time_ms);

        if !lesson.vocabulary.is_empty() {
            let known: HashSet<&str> = lesson.vocabulary.iter().map(|v| v.key.as_str()).collect();
            let mut reported: HashSet<&str> = HashSet::new();
            for event in &lesson.note_events {
                let key = event.vocab_key.as_str();
                if !known.contains(key) && reported.insert(key) {
                    warn!(
                        "lesson {}: note event references unknown vocab key {:?}",
                        lesson.lesson_id, key
                    );
                }
            }
        }

        Ok(lesson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "lessonId": "lesson_3",
        "title": "Meadow Song",
        "noteEvents": [
            {"timeMs": 2000, "lane": 1, "vocabKey": "bee"},
            {"timeMs": 500, "lane": 0, "vocabKey": "ant"},
            {"timeMs": 1250, "lane": 4, "vocabKey": "fox"}
        ]
    }"#;

    #[test]
    fn test_events_sorted_by_time() {
        let lesson = LessonLoader::from_json(MINIMAL).unwrap();
        let times: Vec<i64> = lesson.note_events.iter().map(|e| e.time_ms).collect();
        assert_eq!(times, vec![500, 1250, 2000]);
    }

    #[test]
    fn test_empty_chart_rejected() {
        let json = r#"{"lessonId": "lesson_9", "title": "Empty", "noteEvents": []}"#;
        let err = LessonLoader::from_json(json).unwrap_err();
        assert!(matches!(err, LessonError::EmptyChart(id) if id == "lesson_9"));
    }

    #[test]
    fn test_invalid_lane_rejected() {
        let json = r#"{"lessonId": "x", "noteEvents": [{"timeMs": 0, "lane": 7, "vocabKey": "a"}]}"#;
        assert!(matches!(
            LessonLoader::from_json(json),
            Err(LessonError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lesson.json");
        std::fs::write(&path, MINIMAL).unwrap();

        let lesson = LessonLoader::load(&path).unwrap();
        assert_eq!(lesson.note_count(), 3);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            LessonLoader::load(&missing),
            Err(LessonError::FileRead { .. })
        ));
    }
}
