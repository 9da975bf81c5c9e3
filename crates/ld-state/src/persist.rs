//! Persistence gateway
//!
//! Serialize-on-mutate / deserialize-on-init boundary between the
//! in-memory [`GameStore`] and durable storage. The store itself never
//! touches disk; it snapshots into a [`PersistedState`] that a
//! [`StateStorage`] backend writes wholesale. Card sessions are
//! transient and never persisted, so abandoning one mid-reveal cannot
//! leak a half-committed quota.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use ld_core::{DailyQuota, DayMode, DrawResult, LdError, LdResult, PrizeGrade};

use crate::settings::{Settings, SettingsPatch};
use crate::store::GameStore;

/// Version written by this build; bump on incompatible schema changes
pub const SCHEMA_VERSION: u32 = 1;

/// Durable snapshot of the store
///
/// `#[serde(default)]` keeps loading lenient: blobs written before a
/// field existed (version 0 predates the `version` field itself)
/// deserialize with defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    pub version: u32,
    pub day_mode: DayMode,
    pub quota: DailyQuota,
    /// Newest first
    pub history: Vec<DrawResult>,
    pub settings: Settings,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            day_mode: DayMode::Weekday,
            quota: DailyQuota::initial(DayMode::Weekday),
            history: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl PersistedState {
    /// Snapshot a store
    pub fn snapshot(store: &GameStore) -> Self {
        Self {
            version: SCHEMA_VERSION,
            day_mode: store.day_mode(),
            quota: *store.quota(),
            history: store.history().to_vec(),
            settings: store.settings().clone(),
        }
    }
}

/// Storage backend for the persisted blob
///
/// `load` returns `Ok(None)` when no prior state exists; the caller
/// falls back to day-mode-appropriate defaults.
pub trait StateStorage {
    fn load(&self) -> LdResult<Option<PersistedState>>;
    fn save(&self, state: &PersistedState) -> LdResult<()>;
}

// ============ JSON file backend ============

/// Pretty-JSON file under the platform data directory
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Standard location: `<data_local_dir>/lucky-draw/state.json`
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lucky-draw")
            .join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStorage {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl StateStorage for JsonFileStorage {
    fn load(&self) -> LdResult<Option<PersistedState>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let state = serde_json::from_str(&content)
                    .map_err(|e| LdError::Serialization(e.to_string()))?;
                Ok(Some(state))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, state: &PersistedState) -> LdResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| LdError::Serialization(e.to_string()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

// ============ In-memory backend ============

/// Backend holding the blob in memory (tests, previews)
#[derive(Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<PersistedState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the stored blob
    pub fn with_state(state: PersistedState) -> Self {
        Self { slot: Mutex::new(Some(state)) }
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self) -> LdResult<Option<PersistedState>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, state: &PersistedState) -> LdResult<()> {
        *self.slot.lock() = Some(state.clone());
        Ok(())
    }
}

// ============ Persistent store ============

/// [`GameStore`] wrapped with rehydrate-on-open / flush-on-mutate
///
/// Every persisted-state mutation is followed by a wholesale save; a
/// failing save is logged and the in-memory state stays authoritative
/// for the rest of the session.
pub struct PersistentStore {
    store: GameStore,
    storage: Box<dyn StateStorage>,
}

impl PersistentStore {
    /// Open against a backend, rehydrating prior state if present
    ///
    /// A missing blob yields defaults for `fallback_mode`; an unreadable
    /// blob is logged and likewise replaced with defaults.
    pub fn open(storage: Box<dyn StateStorage>, fallback_mode: DayMode) -> Self {
        let mut store = GameStore::new(fallback_mode);

        match storage.load() {
            Ok(Some(state)) => {
                info!(
                    "rehydrated state: {} history entries, quota {:?}",
                    state.history.len(),
                    state.quota
                );
                store.restore(state.day_mode, state.quota, state.history, state.settings);
            }
            Ok(None) => info!("no prior state, starting with {fallback_mode:?} defaults"),
            Err(e) => warn!("failed to load persisted state ({e}), starting fresh"),
        }

        Self { store, storage }
    }

    /// The wrapped store (read access)
    pub fn store(&self) -> &GameStore {
        &self.store
    }

    fn flush(&mut self) {
        let snapshot = PersistedState::snapshot(&self.store);
        if let Err(e) = self.storage.save(&snapshot) {
            warn!("failed to persist state: {e}");
        }
    }

    // ============ Delegated operations ============
    // Each mutates in memory first, then flushes the snapshot. Card
    // select/reveal only touch the transient session and skip the flush.

    pub fn set_day_mode(&mut self, mode: DayMode) {
        self.store.set_day_mode(mode);
        self.flush();
    }

    pub fn reset_daily_quota(&mut self) {
        self.store.reset_daily_quota();
        self.flush();
    }

    pub fn perform_draw(&mut self, now: chrono::DateTime<chrono::Local>) -> DrawResult {
        let record = self.store.perform_draw(now);
        self.flush();
        record
    }

    pub fn perform_draw_forced(
        &mut self,
        grade: PrizeGrade,
        now: chrono::DateTime<chrono::Local>,
    ) -> DrawResult {
        let record = self.store.perform_draw_forced(grade, now);
        self.flush();
        record
    }

    pub fn claim_prize(&mut self, id: &str) {
        self.store.claim_prize(id);
        self.flush();
    }

    pub fn update_settings(&mut self, patch: &SettingsPatch) {
        self.store.update_settings(patch);
        self.flush();
    }

    pub fn reset_today_participants(&mut self, now: &chrono::DateTime<chrono::Local>) {
        self.store.reset_today_participants(now);
        self.flush();
    }

    pub fn initialize_card_game(&mut self) {
        self.store.initialize_card_game();
    }

    pub fn select_card(&mut self, index: usize) {
        self.store.select_card(index);
    }

    pub fn reveal_next_card(&mut self) -> Option<usize> {
        self.store.reveal_next_card()
    }

    pub fn complete_card_game(
        &mut self,
        now: chrono::DateTime<chrono::Local>,
    ) -> LdResult<DrawResult> {
        let record = self.store.complete_card_game(now)?;
        self.flush();
        Ok(record)
    }

    pub fn abandon_card_game(&mut self) {
        self.store.abandon_card_game();
    }
}
