use crate::chart::{AgeConfig, Lane};
use crate::config::AgeGroup;

/// Accuracy grade for one hit attempt.
///
/// `None` means no note was eligible for the press at all, which is a
/// different outcome from letting a note fall past the line (`Miss`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    Perfect,
    Good,
    Miss,
    None,
}

impl Judgment {
    /// Base score contribution before any combo multiplier.
    pub fn score(self) -> u32 {
        match self {
            Judgment::Perfect => 100,
            Judgment::Good => 50,
            Judgment::Miss | Judgment::None => 0,
        }
    }

    /// True for the grades that count as a successful hit.
    pub fn is_hit(self) -> bool {
        matches!(self, Judgment::Perfect | Judgment::Good)
    }
}

/// Symmetric timing tolerances around a note's target time. The good
/// window is the outer acceptance bound; anything past it is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeWindow {
    pub perfect_ms: i64,
    pub good_ms: i64,
}

impl JudgeWindow {
    pub fn new(perfect_ms: i64, good_ms: i64) -> Self {
        Self {
            perfect_ms,
            good_ms,
        }
    }

    /// Windows from a lesson's tier config.
    pub fn from_age_config(config: &AgeConfig) -> Self {
        Self::new(config.perfect_window_ms as i64, config.good_window_ms as i64)
    }

    /// Fallback windows for a profile with no lesson tier config.
    pub fn for_group(group: AgeGroup) -> Self {
        Self::new(
            group.perfect_window_ms() as i64,
            group.good_window_ms() as i64,
        )
    }

    /// Grade an absolute timing difference, or `None` outside the
    /// acceptance bound.
    pub fn classify(&self, diff_abs_ms: i64) -> Option<Judgment> {
        if diff_abs_ms <= self.perfect_ms {
            Some(Judgment::Perfect)
        } else if diff_abs_ms <= self.good_ms {
            Some(Judgment::Good)
        } else {
            None
        }
    }

    pub fn contains(&self, diff_abs_ms: i64) -> bool {
        diff_abs_ms <= self.good_ms
    }
}

impl Default for JudgeWindow {
    fn default() -> Self {
        Self::for_group(AgeGroup::Explorer)
    }
}

/// Outcome of one hit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeResult {
    pub judgment: Judgment,
    pub lane: Option<Lane>,
    /// Signed offset from the note's target time; negative = early.
    pub timing_diff_ms: i64,
    pub score: u32,
    pub vocab_key: Option<String>,
    pub glitch: bool,
}

impl JudgeResult {
    pub fn new(judgment: Judgment, lane: Lane, timing_diff_ms: i64, vocab_key: String) -> Self {
        Self {
            judgment,
            lane: Some(lane),
            timing_diff_ms,
            score: judgment.score(),
            vocab_key: Some(vocab_key),
            glitch: false,
        }
    }

    pub fn glitch(mut self, glitch: bool) -> Self {
        self.glitch = glitch;
        self
    }

    /// The no-eligible-note outcome. Carries no lane or vocab and
    /// mutates nothing.
    pub fn none() -> Self {
        Self {
            judgment: Judgment::None,
            lane: None,
            timing_diff_ms: 0,
            score: 0,
            vocab_key: None,
            glitch: false,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.judgment.is_hit()
    }

    pub fn is_early(&self) -> bool {
        self.is_hit() && self.timing_diff_ms < 0
    }

    pub fn is_late(&self) -> bool {
        self.is_hit() && self.timing_diff_ms > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        assert_eq!(Judgment::Perfect.score(), 100);
        assert_eq!(Judgment::Good.score(), 50);
        assert_eq!(Judgment::Miss.score(), 0);
        assert_eq!(Judgment::None.score(), 0);
    }

    #[test]
    fn test_classify_boundaries() {
        let window = JudgeWindow::new(160, 280);

        assert_eq!(window.classify(0), Some(Judgment::Perfect));
        assert_eq!(window.classify(160), Some(Judgment::Perfect));
        assert_eq!(window.classify(161), Some(Judgment::Good));
        assert_eq!(window.classify(280), Some(Judgment::Good));
        assert_eq!(window.classify(281), None);
    }

    #[test]
    fn test_group_fallback_windows() {
        let toddler = JudgeWindow::for_group(AgeGroup::Toddler);
        assert_eq!(toddler.perfect_ms, 220);
        assert_eq!(toddler.good_ms, 380);

        let master = JudgeWindow::for_group(AgeGroup::Master);
        assert_eq!(master.perfect_ms, 120);
        assert_eq!(master.good_ms, 220);
    }

    #[test]
    fn test_none_result_is_inert() {
        let result = JudgeResult::none();
        assert_eq!(result.judgment, Judgment::None);
        assert_eq!(result.lane, None);
        assert_eq!(result.score, 0);
        assert!(!result.is_hit());
        assert!(!result.is_early());
        assert!(!result.is_late());
    }

    #[test]
    fn test_early_late() {
        let early = JudgeResult::new(Judgment::Good, Lane::A, -40, "owl".into());
        assert!(early.is_early());
        assert!(!early.is_late());

        let late = JudgeResult::new(Judgment::Perfect, Lane::A, 12, "owl".into());
        assert!(late.is_late());
    }
}
