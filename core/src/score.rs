use serde::{Deserialize, Serialize};

/// Lowest score any completed or timed-out attempt can receive.
pub const SCORE_FLOOR: i64 = 10;

/// Clock readings handed to the scoring formulas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreTiming {
    pub elapsed_seconds: f64,
    pub remaining_seconds: f64,
}

impl ScoreTiming {
    pub fn new(elapsed_seconds: f64, remaining_seconds: f64) -> Self {
        Self {
            elapsed_seconds: elapsed_seconds.max(0.),
            remaining_seconds: remaining_seconds.max(0.),
        }
    }

    /// Splits a time budget the way the countdown reports it.
    pub fn from_budget(total_seconds: f64, remaining_seconds: f64) -> Self {
        Self::new(total_seconds - remaining_seconds, remaining_seconds)
    }
}

/// Linear score formula: base plus remaining-time bonus, minus elapsed-time and error penalties.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScoreRule {
    pub base: i64,
    pub time_bonus_rate: Option<f64>,
    pub time_penalty_rate: f64,
    pub error_penalty: i64,
    pub floor: i64,
    pub ceiling: Option<i64>,
}

pub const GRID_FILL_RULE: ScoreRule = ScoreRule {
    base: 100,
    time_bonus_rate: Some(1.2),
    time_penalty_rate: 1.0,
    error_penalty: 8,
    floor: SCORE_FLOOR,
    ceiling: Some(100),
};

pub const MATRIX_DIFFERENCE_RULE: ScoreRule = ScoreRule {
    base: 100,
    time_bonus_rate: None,
    time_penalty_rate: 1.5,
    error_penalty: 12,
    floor: SCORE_FLOOR,
    ceiling: None,
};

pub const PAIR_MATCHING_RULE: ScoreRule = ScoreRule {
    base: 100,
    time_bonus_rate: None,
    time_penalty_rate: 0.6,
    error_penalty: 10,
    floor: SCORE_FLOOR,
    ceiling: None,
};

/// Read-only snapshot of how a final score was reached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total_score: u32,
    pub base_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_bonus: Option<u32>,
    pub time_penalty: u32,
    pub error_penalty: u32,
    pub wrong_count: u32,
    pub elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<f64>,
}

impl ScoreRule {
    pub fn score(&self, timing: ScoreTiming, wrong_count: u32) -> u32 {
        self.breakdown(timing, wrong_count).total_score
    }

    pub fn breakdown(&self, timing: ScoreTiming, wrong_count: u32) -> ScoreBreakdown {
        let time_bonus = self
            .time_bonus_rate
            .map(|rate| (timing.remaining_seconds * rate).floor() as i64);
        let time_penalty = (timing.elapsed_seconds * self.time_penalty_rate).floor() as i64;
        let error_penalty = i64::from(wrong_count) * self.error_penalty;

        let raw = self.base + time_bonus.unwrap_or(0) - time_penalty - error_penalty;
        let mut total = raw.max(self.floor);
        if let Some(ceiling) = self.ceiling {
            total = total.min(ceiling);
        }

        ScoreBreakdown {
            total_score: clamp_u32(total),
            base_score: clamp_u32(self.base),
            time_bonus: time_bonus.map(clamp_u32),
            time_penalty: clamp_u32(time_penalty),
            error_penalty: clamp_u32(error_penalty),
            wrong_count,
            elapsed_seconds: timing.elapsed_seconds,
            remaining_seconds: self
                .time_bonus_rate
                .map(|_| timing.remaining_seconds),
        }
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}
