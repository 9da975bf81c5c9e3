//! Quota reconciliation

use log::debug;

use ld_core::{DailyQuota, PrizeGrade};

/// Reconcile a sampled grade against the remaining quota
///
/// A prize tier with zero remaining inventory is force-downgraded to
/// `Lose` and the quota is returned untouched. Otherwise the matching
/// field is decremented by exactly one and the grade passes through.
/// `Lose` never touches quota. Pure function; the caller commits the
/// returned quota in the same mutation that records the draw.
pub fn reconcile(sampled: PrizeGrade, quota: &DailyQuota) -> (PrizeGrade, DailyQuota) {
    let mut updated = *quota;
    let slot = match sampled {
        PrizeGrade::First => Some(&mut updated.first),
        PrizeGrade::Second => Some(&mut updated.second),
        PrizeGrade::Third => Some(&mut updated.third),
        PrizeGrade::Lose => None,
    };

    match slot {
        Some(remaining) if *remaining == 0 => {
            debug!("quota exhausted for {sampled}, downgrading to lose");
            (PrizeGrade::Lose, *quota)
        }
        Some(remaining) => {
            *remaining -= 1;
            (sampled, updated)
        }
        None => (PrizeGrade::Lose, *quota),
    }
}
