//! Daily prize quotas

use serde::{Deserialize, Serialize};

use crate::grade::{DayMode, PrizeGrade};

/// Remaining prize inventory for the current day mode
///
/// Fields are unsigned, so a quota can never go negative; the ledger
/// decrements only after checking availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyQuota {
    pub first: u32,
    pub second: u32,
    pub third: u32,
}

impl DailyQuota {
    /// Weekday allotment (300 expected participants)
    pub const WEEKDAY: Self = Self { first: 1, second: 3, third: 5 };

    /// Weekend allotment (750 expected participants)
    pub const WEEKEND: Self = Self { first: 2, second: 2, third: 10 };

    /// Full initial allotment for a day mode
    pub fn initial(mode: DayMode) -> Self {
        match mode {
            DayMode::Weekday => Self::WEEKDAY,
            DayMode::Weekend => Self::WEEKEND,
        }
    }

    /// Remaining inventory for a grade (`Lose` has no inventory)
    pub fn remaining(&self, grade: PrizeGrade) -> Option<u32> {
        match grade {
            PrizeGrade::First => Some(self.first),
            PrizeGrade::Second => Some(self.second),
            PrizeGrade::Third => Some(self.third),
            PrizeGrade::Lose => None,
        }
    }

    /// All prize tiers exhausted (the event is over for today)
    pub fn is_exhausted(&self) -> bool {
        self.first == 0 && self.second == 0 && self.third == 0
    }
}

impl Default for DailyQuota {
    fn default() -> Self {
        Self::WEEKDAY
    }
}
