//! Probability tables and grade sampling

use rand::Rng;
use serde::{Deserialize, Serialize};

use ld_core::{DayMode, PrizeGrade};

/// One (grade, probability) pair of a table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityEntry {
    pub grade: PrizeGrade,
    /// Probability mass in [0, 1]
    pub probability: f64,
}

/// Ordered grade-probability mapping summing to 1.0
///
/// Order matters: cumulative sampling walks entries in sequence, and the
/// trailing `Lose` entry doubles as the rounding-error catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    entries: Vec<ProbabilityEntry>,
}

impl ProbabilityTable {
    /// Weekday table (300 participants: 1st 0.33%, 2nd 1.00%, 3rd 1.67%)
    pub fn weekday() -> Self {
        Self {
            entries: vec![
                ProbabilityEntry { grade: PrizeGrade::First, probability: 0.0033 },
                ProbabilityEntry { grade: PrizeGrade::Second, probability: 0.0100 },
                ProbabilityEntry { grade: PrizeGrade::Third, probability: 0.0167 },
                ProbabilityEntry { grade: PrizeGrade::Lose, probability: 0.9700 },
            ],
        }
    }

    /// Weekend table (750 participants: 1st 0.27%, 2nd 0.27%, 3rd 1.33%)
    pub fn weekend() -> Self {
        Self {
            entries: vec![
                ProbabilityEntry { grade: PrizeGrade::First, probability: 0.0027 },
                ProbabilityEntry { grade: PrizeGrade::Second, probability: 0.0027 },
                ProbabilityEntry { grade: PrizeGrade::Third, probability: 0.0133 },
                ProbabilityEntry { grade: PrizeGrade::Lose, probability: 0.9813 },
            ],
        }
    }

    /// Table for the given day mode
    pub fn for_mode(mode: DayMode) -> Self {
        match mode {
            DayMode::Weekday => Self::weekday(),
            DayMode::Weekend => Self::weekend(),
        }
    }

    /// Entries in evaluation order
    pub fn entries(&self) -> &[ProbabilityEntry] {
        &self.entries
    }

    /// Total probability mass (should be 1.0 up to float rounding)
    pub fn total_mass(&self) -> f64 {
        self.entries.iter().map(|e| e.probability).sum()
    }

    /// Map a uniform unit value in [0, 1) to a grade
    ///
    /// Walks entries in order accumulating mass and returns the first
    /// entry whose cumulative mass exceeds `unit`. A rounding miss past
    /// the final entry falls back to `Lose` rather than erroring.
    pub fn sample_unit(&self, unit: f64) -> PrizeGrade {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.probability;
            if unit < cumulative {
                return entry.grade;
            }
        }
        PrizeGrade::Lose
    }

    /// Sample a grade from an injected random source
    pub fn sample<R: Rng>(&self, rng: &mut R) -> PrizeGrade {
        self.sample_unit(rng.random::<f64>())
    }
}
