use serde::{Deserialize, Serialize};

/// Player age group. Drives the default timing windows, tempo and review
/// note frequency when a lesson carries no tier config of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    /// 3-5 years: slow tempo, wide timing.
    Toddler,
    /// 6-8 years: medium.
    #[default]
    Explorer,
    /// 9+ years: challenging.
    Master,
}

impl AgeGroup {
    pub fn perfect_window_ms(self) -> u32 {
        match self {
            AgeGroup::Toddler => 220,
            AgeGroup::Explorer => 160,
            AgeGroup::Master => 120,
        }
    }

    pub fn good_window_ms(self) -> u32 {
        match self {
            AgeGroup::Toddler => 380,
            AgeGroup::Explorer => 280,
            AgeGroup::Master => 220,
        }
    }

    pub fn bpm(self) -> u32 {
        match self {
            AgeGroup::Toddler => 60,
            AgeGroup::Explorer => 90,
            AgeGroup::Master => 120,
        }
    }

    /// Inject a review (glitch) note every N notes.
    pub fn glitch_note_interval(self) -> u32 {
        match self {
            AgeGroup::Toddler => 12,
            AgeGroup::Explorer => 8,
            AgeGroup::Master => 5,
        }
    }
}

/// Player profile: age-tier selection plus session-to-session
/// progression counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub age_group: AgeGroup,
    pub total_stars: u32,
    pub levels_completed: u32,
}

impl PlayerProfile {
    pub fn new(age_group: AgeGroup) -> Self {
        Self {
            age_group,
            total_stars: 0,
            levels_completed: 0,
        }
    }

    pub fn add_stars(&mut self, stars: u8) {
        self.total_stars += stars as u32;
    }

    pub fn complete_level(&mut self) {
        self.levels_completed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults_narrow_with_age() {
        assert!(AgeGroup::Toddler.perfect_window_ms() > AgeGroup::Explorer.perfect_window_ms());
        assert!(AgeGroup::Explorer.perfect_window_ms() > AgeGroup::Master.perfect_window_ms());
        assert!(AgeGroup::Toddler.good_window_ms() > AgeGroup::Master.good_window_ms());
    }

    #[test]
    fn test_default_group_is_explorer() {
        let profile = PlayerProfile::default();
        assert_eq!(profile.age_group, AgeGroup::Explorer);
        assert_eq!(profile.age_group.bpm(), 90);
    }

    #[test]
    fn test_progression_counters() {
        let mut profile = PlayerProfile::new(AgeGroup::Master);
        profile.add_stars(3);
        profile.add_stars(2);
        profile.complete_level();
        assert_eq!(profile.total_stars, 5);
        assert_eq!(profile.levels_completed, 1);
    }
}
