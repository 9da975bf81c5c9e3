//! Game store — the single mutation funnel
//!
//! Explicit state container (no ambient global): construct one, pass it
//! by reference to consumers, and route every mutation through the named
//! operations below. All randomness flows through the injected RNG so
//! tests construct isolated, deterministic instances.

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use ld_core::{DailyQuota, DayMode, DrawResult, LdError, LdResult, PrizeGrade};
use ld_engine::{create_record, reconcile, same_calendar_day, ProbabilityTable};

use crate::card::{CardGame, GamePhase};
use crate::settings::{Settings, SettingsPatch};

/// In-memory game state and its operations
///
/// Owns quota, history (newest first), settings and the transient card
/// session. Single-writer: every operation takes `&mut self` and runs to
/// completion, which makes check-then-decrement atomic within one
/// runtime. Cross-device quota races are a known scaling limit of the
/// one-shared-device deployment, not something the store guards against.
#[derive(Debug)]
pub struct GameStore {
    day_mode: DayMode,
    quota: DailyQuota,
    /// Newest first
    history: Vec<DrawResult>,
    settings: Settings,
    card_game: Option<CardGame>,
    last_draw: Option<DrawResult>,
    rng: StdRng,
}

impl GameStore {
    /// Fresh store for a day mode, OS-seeded RNG
    pub fn new(day_mode: DayMode) -> Self {
        Self::with_rng(day_mode, StdRng::from_os_rng())
    }

    /// Fresh store with an injected RNG (deterministic tests)
    pub fn with_rng(day_mode: DayMode, rng: StdRng) -> Self {
        Self {
            day_mode,
            quota: DailyQuota::initial(day_mode),
            history: Vec::new(),
            settings: Settings::default(),
            card_game: None,
            last_draw: None,
            rng,
        }
    }

    // ============ Accessors ============

    pub fn day_mode(&self) -> DayMode {
        self.day_mode
    }

    pub fn quota(&self) -> &DailyQuota {
        &self.quota
    }

    pub fn history(&self) -> &[DrawResult] {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn card_game(&self) -> Option<&CardGame> {
        self.card_game.as_ref()
    }

    pub fn last_draw(&self) -> Option<&DrawResult> {
        self.last_draw.as_ref()
    }

    /// Draws recorded on the calendar date of `now`
    pub fn today_participants(&self, now: &DateTime<Local>) -> usize {
        ld_engine::draws_on_day(&self.history, now)
    }

    /// All prize tiers exhausted for today
    pub fn is_event_ended(&self) -> bool {
        self.quota.is_exhausted()
    }

    // ============ Mode / quota ============

    /// Switch day mode; resets quota to the mode's full allotment
    pub fn set_day_mode(&mut self, mode: DayMode) {
        info!("day mode -> {mode:?}, resetting quota");
        self.day_mode = mode;
        self.quota = DailyQuota::initial(mode);
    }

    /// Overwrite the quota with the current mode's full allotment
    pub fn reset_daily_quota(&mut self) {
        info!("manual quota reset ({:?})", self.day_mode);
        self.quota = DailyQuota::initial(self.day_mode);
    }

    // ============ Timer-mode draw ============

    /// Run one complete draw: sample, reconcile, record, append
    pub fn perform_draw(&mut self, now: DateTime<Local>) -> DrawResult {
        let sampled = ProbabilityTable::for_mode(self.day_mode).sample(&mut self.rng);
        self.finish_draw(sampled, now)
    }

    /// Draw with a forced sample (operator/test path), still subject to
    /// quota reconciliation
    pub fn perform_draw_forced(&mut self, sampled: PrizeGrade, now: DateTime<Local>) -> DrawResult {
        self.finish_draw(sampled, now)
    }

    fn finish_draw(&mut self, sampled: PrizeGrade, now: DateTime<Local>) -> DrawResult {
        let (grade, quota) = reconcile(sampled, &self.quota);
        self.quota = quota;

        let record = create_record(grade, &self.history, now, &mut self.rng);
        debug!("draw {} -> {} (sampled {})", record.draw_number, grade, sampled);
        self.history.insert(0, record.clone());
        self.last_draw = Some(record.clone());
        record
    }

    // ============ History ============

    /// Mark a record claimed; unknown ids are a no-op
    pub fn claim_prize(&mut self, id: &str) {
        match self.history.iter_mut().find(|r| r.id == id) {
            Some(record) => record.is_claimed = true,
            None => warn!("claim for unknown draw id {id}"),
        }
    }

    /// Delete today's records only (participant reset)
    pub fn reset_today_participants(&mut self, now: &DateTime<Local>) {
        let before = self.history.len();
        self.history.retain(|r| !same_calendar_day(r.timestamp, now));
        info!("pruned {} records for today", before - self.history.len());
    }

    // ============ Settings ============

    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        patch.apply(&mut self.settings);
    }

    // ============ Card game ============

    /// Start a card session: sample + reconcile against the current
    /// quota without committing it (commit happens at completion)
    pub fn initialize_card_game(&mut self) {
        let sampled = ProbabilityTable::for_mode(self.day_mode).sample(&mut self.rng);
        let (grade, _) = reconcile(sampled, &self.quota);
        let card_count = self.settings.card_count as usize;
        let game = CardGame::deal(grade, card_count, &mut self.rng);
        debug!("card game dealt: {} cards, winning slot {}", card_count, game.winning_card_index);
        self.card_game = Some(game);
    }

    /// Start a card session with a fixed grade and winning slot
    /// (operator/test path); the grade is still quota-reconciled
    pub fn initialize_card_game_forced(&mut self, sampled: PrizeGrade, winning_card_index: usize) {
        let (grade, _) = reconcile(sampled, &self.quota);
        let card_count = self.settings.card_count as usize;
        self.card_game = Some(CardGame::deal_forced(grade, card_count, winning_card_index));
    }

    /// Player selects a card; duplicate selections are silent no-ops
    pub fn select_card(&mut self, index: usize) {
        if let Some(game) = self.card_game.as_mut() {
            game.select(index);
        }
    }

    /// Flip the next card in reveal order; returns the revealed index
    pub fn reveal_next_card(&mut self) -> Option<usize> {
        self.card_game.as_mut().and_then(|game| game.reveal_next())
    }

    /// Commit the session: decrement quota, build and append the record
    ///
    /// Errors when no session exists or cards remain face-down — never
    /// fabricates a record. Calling again after completion returns the
    /// already-committed record (idempotent for UI re-entrancy).
    pub fn complete_card_game(&mut self, now: DateTime<Local>) -> LdResult<DrawResult> {
        let Some(game) = self.card_game.as_ref() else {
            return Err(LdError::CardGameNotInitialized);
        };

        if game.game_phase == GamePhase::Complete {
            return self.last_draw.clone().ok_or(LdError::CardGameNotInitialized);
        }
        if !game.all_revealed() {
            return Err(LdError::CardGameNotRevealed {
                revealed: game.revealed_cards.len(),
                total: game.cards.len(),
            });
        }

        // Re-reconcile at commit time: the session held no quota
        // reservation, so the inventory must be re-checked here.
        let (grade, quota) = reconcile(game.winning_grade, &self.quota);
        self.quota = quota;

        let record = create_record(grade, &self.history, now, &mut self.rng);
        self.history.insert(0, record.clone());
        self.last_draw = Some(record.clone());
        if let Some(game) = self.card_game.as_mut() {
            game.game_phase = GamePhase::Complete;
        }
        Ok(record)
    }

    /// Discard the session without committing anything (UI teardown)
    pub fn abandon_card_game(&mut self) {
        if self.card_game.take().is_some() {
            debug!("card game abandoned");
        }
    }

    // ============ Persistence hooks ============

    pub(crate) fn restore(
        &mut self,
        day_mode: DayMode,
        quota: DailyQuota,
        history: Vec<DrawResult>,
        settings: Settings,
    ) {
        self.day_mode = day_mode;
        self.quota = quota;
        self.history = history;
        self.settings = settings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn weekday_store(seed: u64) -> GameStore {
        GameStore::with_rng(DayMode::Weekday, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_scenario_a_first_prize_draw() {
        let mut store = weekday_store(1);
        let now = noon(2025, 12, 17);

        let record = store.perform_draw_forced(PrizeGrade::First, now);
        assert_eq!(record.grade, PrizeGrade::First);
        assert_eq!(record.draw_number, "#20251217-001");
        assert_eq!(*store.quota(), DailyQuota { first: 0, second: 3, third: 5 });
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_scenario_b_exhausted_first_downgrades() {
        let mut store = weekday_store(1);
        let now = noon(2025, 12, 17);

        store.perform_draw_forced(PrizeGrade::First, now);
        let record = store.perform_draw_forced(PrizeGrade::First, now);

        assert_eq!(record.grade, PrizeGrade::Lose);
        assert_eq!(record.draw_number, "#20251217-002");
        assert_eq!(*store.quota(), DailyQuota { first: 0, second: 3, third: 5 });
    }

    #[test]
    fn test_scenario_c_card_game_end_to_end() {
        let mut store = weekday_store(2);
        let now = noon(2025, 12, 17);

        store.initialize_card_game_forced(PrizeGrade::Second, 2);
        store.select_card(0);

        let mut revealed = Vec::new();
        while let Some(index) = store.reveal_next_card() {
            revealed.push(index);
        }
        assert_eq!(revealed, vec![1, 2, 3, 4, 0]);

        let record = store.complete_card_game(now).unwrap();
        assert_eq!(record.grade, PrizeGrade::Second);
        assert!(store.card_game().unwrap().is_complete());
        assert_eq!(store.quota().second, 2);
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_card_reveal_order_when_winning_card_selected() {
        // The selected card is revealed last regardless of where the
        // winning slot sits.
        let mut store = weekday_store(3);
        store.initialize_card_game_forced(PrizeGrade::Second, 2);
        store.select_card(2);

        let mut revealed = Vec::new();
        while let Some(index) = store.reveal_next_card() {
            revealed.push(index);
        }
        assert_eq!(revealed, vec![0, 1, 3, 4, 2]);
    }

    #[test]
    fn test_complete_without_session_errors() {
        let mut store = weekday_store(4);
        let result = store.complete_card_game(noon(2025, 12, 17));
        assert!(matches!(result, Err(LdError::CardGameNotInitialized)));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_complete_before_all_revealed_errors() {
        let mut store = weekday_store(5);
        store.initialize_card_game_forced(PrizeGrade::Lose, 0);
        store.select_card(1);
        store.reveal_next_card();

        let result = store.complete_card_game(noon(2025, 12, 17));
        assert!(matches!(result, Err(LdError::CardGameNotRevealed { revealed: 1, total: 5 })));
    }

    #[test]
    fn test_complete_twice_returns_same_record() {
        let mut store = weekday_store(6);
        let now = noon(2025, 12, 17);
        store.initialize_card_game_forced(PrizeGrade::Third, 1);
        store.select_card(1);
        while store.reveal_next_card().is_some() {}

        let first = store.complete_card_game(now).unwrap();
        let second = store.complete_card_game(now).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.quota().third, 4);
    }

    #[test]
    fn test_abandoned_card_game_commits_nothing() {
        let mut store = weekday_store(7);
        store.initialize_card_game_forced(PrizeGrade::First, 0);
        store.select_card(0);
        store.reveal_next_card();
        store.abandon_card_game();

        assert!(store.card_game().is_none());
        assert_eq!(*store.quota(), DailyQuota::initial(DayMode::Weekday));
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_card_quota_committed_only_at_completion() {
        let mut store = weekday_store(8);
        store.initialize_card_game_forced(PrizeGrade::First, 3);
        // Dealt but not committed.
        assert_eq!(store.quota().first, 1);
        store.select_card(3);
        while store.reveal_next_card().is_some() {}
        assert_eq!(store.quota().first, 1);

        store.complete_card_game(noon(2025, 12, 17)).unwrap();
        assert_eq!(store.quota().first, 0);
    }

    #[test]
    fn test_claim_prize_one_shot_and_unknown_noop() {
        let mut store = weekday_store(9);
        let record = store.perform_draw_forced(PrizeGrade::Third, noon(2025, 12, 17));
        assert!(!record.is_claimed);

        store.claim_prize(&record.id);
        assert!(store.history()[0].is_claimed);

        store.claim_prize("no-such-id");
        assert_eq!(store.history().len(), 1);
    }

    #[test]
    fn test_today_participants_and_reset() {
        let mut store = weekday_store(10);
        let yesterday = noon(2025, 12, 16);
        let today = noon(2025, 12, 17);

        store.perform_draw_forced(PrizeGrade::Lose, yesterday);
        store.perform_draw_forced(PrizeGrade::Lose, today);
        store.perform_draw_forced(PrizeGrade::Lose, today);

        assert_eq!(store.today_participants(&today), 2);
        assert_eq!(store.today_participants(&yesterday), 1);

        store.reset_today_participants(&today);
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.today_participants(&today), 0);
        assert_eq!(store.today_participants(&yesterday), 1);
    }

    #[test]
    fn test_set_day_mode_resets_quota() {
        let mut store = weekday_store(11);
        store.perform_draw_forced(PrizeGrade::Third, noon(2025, 12, 17));
        assert_eq!(store.quota().third, 4);

        store.set_day_mode(DayMode::Weekend);
        assert_eq!(*store.quota(), DailyQuota::initial(DayMode::Weekend));

        store.set_day_mode(DayMode::Weekday);
        assert_eq!(*store.quota(), DailyQuota::initial(DayMode::Weekday));
    }

    #[test]
    fn test_event_ends_when_quota_drains() {
        let mut store = weekday_store(12);
        let now = noon(2025, 12, 17);
        store.perform_draw_forced(PrizeGrade::First, now);
        for _ in 0..3 {
            store.perform_draw_forced(PrizeGrade::Second, now);
        }
        for _ in 0..5 {
            store.perform_draw_forced(PrizeGrade::Third, now);
        }
        assert!(store.is_event_ended());

        // Further prize samples all downgrade.
        let record = store.perform_draw_forced(PrizeGrade::Second, now);
        assert_eq!(record.grade, PrizeGrade::Lose);
    }

    #[test]
    fn test_draw_numbers_gapless_within_day() {
        let mut store = weekday_store(13);
        let now = noon(2025, 12, 17);
        for expected in 1..=10 {
            let record = store.perform_draw(now);
            assert_eq!(record.draw_number, format!("#20251217-{expected:03}"));
        }
    }
}
