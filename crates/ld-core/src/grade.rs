//! Prize grades and day modes

use serde::{Deserialize, Serialize};

/// Outcome tier of a single draw
///
/// Serialized with the wire names used by the persisted state blob
/// (`"1st"`, `"2nd"`, `"3rd"`, `"lose"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrizeGrade {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "lose")]
    Lose,
}

impl PrizeGrade {
    /// All prize tiers (excludes `Lose`)
    pub const PRIZES: [PrizeGrade; 3] = [Self::First, Self::Second, Self::Third];

    /// Whether this grade pays out
    pub fn is_prize(&self) -> bool {
        !matches!(self, Self::Lose)
    }

    /// Units awarded for this grade (1st: 8, 2nd: 4, 3rd: 1, lose: 0)
    pub fn prize_count(&self) -> u32 {
        match self {
            Self::First => 8,
            Self::Second => 4,
            Self::Third => 1,
            Self::Lose => 0,
        }
    }

    /// Display label for result screens
    pub fn label(&self) -> &'static str {
        match self {
            Self::First => "8 bagels",
            Self::Second => "4 bagels",
            Self::Third => "1 bagel (your pick)",
            Self::Lose => "no win",
        }
    }
}

impl std::fmt::Display for PrizeGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
            Self::Lose => "lose",
        };
        write!(f, "{name}")
    }
}

/// Weekday vs. weekend operation
///
/// Selects which probability table and initial quota apply. Derived from
/// the calendar by the caller; the core never reads the wall clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMode {
    Weekday,
    Weekend,
}

impl DayMode {
    /// Derive the mode from a calendar day (Saturday/Sunday = weekend)
    pub fn from_weekday(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sat | chrono::Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, Self::Weekend)
    }
}

impl Default for DayMode {
    fn default() -> Self {
        Self::Weekday
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_wire_names() {
        let json = serde_json::to_string(&PrizeGrade::First).unwrap();
        assert_eq!(json, "\"1st\"");
        let back: PrizeGrade = serde_json::from_str("\"lose\"").unwrap();
        assert_eq!(back, PrizeGrade::Lose);
    }

    #[test]
    fn test_prize_counts() {
        assert_eq!(PrizeGrade::First.prize_count(), 8);
        assert_eq!(PrizeGrade::Second.prize_count(), 4);
        assert_eq!(PrizeGrade::Third.prize_count(), 1);
        assert_eq!(PrizeGrade::Lose.prize_count(), 0);
        assert!(!PrizeGrade::Lose.is_prize());
        assert!(PrizeGrade::Third.is_prize());
    }

    #[test]
    fn test_day_mode_from_weekday() {
        assert_eq!(DayMode::from_weekday(chrono::Weekday::Mon), DayMode::Weekday);
        assert_eq!(DayMode::from_weekday(chrono::Weekday::Fri), DayMode::Weekday);
        assert_eq!(DayMode::from_weekday(chrono::Weekday::Sat), DayMode::Weekend);
        assert_eq!(DayMode::from_weekday(chrono::Weekday::Sun), DayMode::Weekend);
    }
}
