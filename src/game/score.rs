use super::Judgment;

/// Combo length above which the higher score multiplier kicks in.
const COMBO_TIER_HIGH: u32 = 10;
const COMBO_TIER_LOW: u32 = 5;

/// Cumulative score, combo and judgment counters for one play session.
///
/// Each successful hit contributes its base score scaled by the current
/// combo tier: ×1.5 above a 10-combo, ×1.2 above a 5-combo, ×1 below.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub perfect_count: u32,
    pub good_count: u32,
    pub miss_count: u32,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful hit and return the (tier-multiplied) score it
    /// contributed. Non-hit judgments contribute nothing.
    pub fn record_hit(&mut self, judgment: Judgment) -> u32 {
        match judgment {
            Judgment::Perfect => self.perfect_count += 1,
            Judgment::Good => self.good_count += 1,
            Judgment::Miss | Judgment::None => return 0,
        }

        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);

        let base = judgment.score();
        let contribution = if self.combo > COMBO_TIER_HIGH {
            (base as f32 * 1.5) as u32
        } else if self.combo > COMBO_TIER_LOW {
            (base as f32 * 1.2) as u32
        } else {
            base
        };
        self.score += contribution;
        contribution
    }

    /// Record a fallen-past note: counts the miss and breaks the combo.
    pub fn record_miss(&mut self) {
        self.miss_count += 1;
        self.combo = 0;
    }

    /// Notes judged so far (hits plus misses).
    pub fn counted(&self) -> u32 {
        self.perfect_count + self.good_count + self.miss_count
    }

    /// Hit percentage over judged notes; 100 before anything is judged.
    pub fn accuracy(&self) -> f32 {
        let counted = self.counted();
        if counted == 0 {
            return 100.0;
        }
        (self.perfect_count + self.good_count) as f32 / counted as f32 * 100.0
    }

    /// Star rating for a finished session over `total_notes` chart notes.
    pub fn stars(&self, total_notes: u32) -> u8 {
        if total_notes == 0 {
            return 0;
        }
        let total = total_notes as f32;
        let accuracy = (self.perfect_count + self.good_count) as f32 / total;
        let perfect_ratio = self.perfect_count as f32 / total;

        if accuracy >= 0.95 && perfect_ratio >= 0.8 {
            3
        } else if accuracy >= 0.8 {
            2
        } else if accuracy >= 0.6 {
            1
        } else {
            0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
