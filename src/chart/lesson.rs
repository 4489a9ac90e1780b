use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::AgeGroup;

use super::Lane;

/// A single note event in a lesson chart: when to hit, where, and which
/// vocabulary item it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteEvent {
    pub time_ms: i64,
    pub lane: Lane,
    pub vocab_key: String,
}

/// Vocabulary entry referenced by note events. Content only; judgment
/// never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabItem {
    pub key: String,
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub lane: Option<Lane>,
}

/// Per-age-tier tuning block: tempo, timing windows and how often a
/// review (glitch) note is injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeConfig {
    pub bpm: u32,
    #[serde(rename = "perfectWindow")]
    pub perfect_window_ms: u32,
    #[serde(rename = "goodWindow")]
    pub good_window_ms: u32,
    pub glitch_note_interval: u32,
}

/// One playable song: an ordered note chart plus the tier configs and
/// vocabulary it was authored with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lesson {
    pub lesson_id: String,
    pub title: String,
    pub base_song: Option<String>,
    pub age_configs: HashMap<AgeGroup, AgeConfig>,
    pub note_events: Vec<NoteEvent>,
    #[serde(rename = "vocabItems", alias = "vocabulary")]
    pub vocabulary: Vec<VocabItem>,
}

impl Lesson {
    /// Tier config for the given age group, if the lesson carries one.
    pub fn config_for_age(&self, age_group: AgeGroup) -> Option<&AgeConfig> {
        self.age_configs.get(&age_group)
    }

    pub fn note_count(&self) -> usize {
        self.note_events.len()
    }

    /// Duration from the first to the last chart event.
    pub fn chart_span_ms(&self) -> i64 {
        match (self.note_events.first(), self.note_events.last()) {
            (Some(first), Some(last)) => last.time_ms - first.time_ms,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_with_tier() -> Lesson {
        let mut age_configs = HashMap::new();
        age_configs.insert(
            AgeGroup::Explorer,
            AgeConfig {
                bpm: 90,
                perfect_window_ms: 160,
                good_window_ms: 280,
                glitch_note_interval: 8,
            },
        );
        Lesson {
            lesson_id: "lesson_1".into(),
            title: "Forest Song".into(),
            age_configs,
            note_events: vec![
                NoteEvent {
                    time_ms: 1000,
                    lane: Lane::C,
                    vocab_key: "apple".into(),
                },
                NoteEvent {
                    time_ms: 2500,
                    lane: Lane::E,
                    vocab_key: "bird".into(),
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_config_for_age() {
        let lesson = lesson_with_tier();
        assert!(lesson.config_for_age(AgeGroup::Explorer).is_some());
        assert!(lesson.config_for_age(AgeGroup::Toddler).is_none());
    }

    #[test]
    fn test_chart_span() {
        let lesson = lesson_with_tier();
        assert_eq!(lesson.note_count(), 2);
        assert_eq!(lesson.chart_span_ms(), 1500);
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "lessonId": "lesson_7",
            "title": "Ocean Song",
            "ageConfigs": {
                "TODDLER": {"bpm": 60, "perfectWindow": 220, "goodWindow": 380, "glitchNoteInterval": 12}
            },
            "noteEvents": [
                {"timeMs": 500, "lane": 2, "vocabKey": "fish", "beatIndex": 1}
            ],
            "vocabItems": [
                {"key": "fish", "word": "fish", "translation": "con cá", "lane": 2}
            ]
        }"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.lesson_id, "lesson_7");
        assert_eq!(lesson.note_events[0].lane, Lane::E);
        let tier = lesson.config_for_age(AgeGroup::Toddler).unwrap();
        assert_eq!(tier.perfect_window_ms, 220);
        assert_eq!(lesson.vocabulary[0].key, "fish");
    }
}
