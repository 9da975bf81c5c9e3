//! Card-game session state machine
//!
//! Alternative presentation mode: the player picks 1 of N face-down
//! cards, then an external timer driver flips the rest before finally
//! revealing the chosen card. The grade was already sampled and
//! reconciled when the session was dealt; quota is committed only when
//! the store completes the session, so abandoning mid-reveal (component
//! teardown) leaks nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use ld_core::PrizeGrade;

/// One face-down card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    pub id: u32,
    pub grade: PrizeGrade,
    pub is_winning: bool,
}

/// Linear session phases, no backward transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Selecting,
    Revealing,
    Complete,
}

/// Wall-clock pacing for the reveal driver (milliseconds)
///
/// The state machine itself is timer-free; the UI schedules
/// `reveal_next` / completion using these delays and may cancel them at
/// any point by dropping the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealTiming {
    pub first_reveal_ms: u64,
    pub subsequent_reveal_ms: u64,
    pub completion_delay_ms: u64,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            first_reveal_ms: 300,
            subsequent_reveal_ms: 500,
            completion_delay_ms: 1200,
        }
    }
}

impl RevealTiming {
    /// Delay before the next reveal, given how many cards are already up
    pub fn delay_before_reveal(&self, revealed_count: usize) -> u64 {
        if revealed_count == 0 {
            self.first_reveal_ms
        } else {
            self.subsequent_reveal_ms
        }
    }
}

/// One card-game session
///
/// Created fresh on entry, discarded on exit. Exactly one card is the
/// winning slot; all others are forced to `Lose`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGame {
    pub cards: Vec<CardData>,
    pub selected_card_index: Option<usize>,
    pub winning_card_index: usize,
    pub winning_grade: PrizeGrade,
    /// Indices in reveal order, selected card last
    pub revealed_cards: Vec<usize>,
    pub game_phase: GamePhase,
}

impl CardGame {
    /// Deal a fresh session: uniform winning slot, one winning card
    /// carrying the (already reconciled) grade, the rest `Lose`
    pub fn deal<R: Rng>(winning_grade: PrizeGrade, card_count: usize, rng: &mut R) -> Self {
        let card_count = card_count.max(1);
        let winning_card_index = rng.random_range(0..card_count);

        let cards = (0..card_count)
            .map(|i| CardData {
                id: i as u32,
                grade: if i == winning_card_index { winning_grade } else { PrizeGrade::Lose },
                is_winning: i == winning_card_index,
            })
            .collect();

        Self {
            cards,
            selected_card_index: None,
            winning_card_index,
            winning_grade,
            revealed_cards: Vec::new(),
            game_phase: GamePhase::Selecting,
        }
    }

    /// Deal with a fixed winning slot (operator/test path)
    pub fn deal_forced(winning_grade: PrizeGrade, card_count: usize, winning_card_index: usize) -> Self {
        let card_count = card_count.max(1);
        let winning_card_index = winning_card_index.min(card_count - 1);

        let cards = (0..card_count)
            .map(|i| CardData {
                id: i as u32,
                grade: if i == winning_card_index { winning_grade } else { PrizeGrade::Lose },
                is_winning: i == winning_card_index,
            })
            .collect();

        Self {
            cards,
            selected_card_index: None,
            winning_card_index,
            winning_grade,
            revealed_cards: Vec::new(),
            game_phase: GamePhase::Selecting,
        }
    }

    /// Player picks a card; at most one selection per session
    ///
    /// A second selection, an out-of-range index, or a call outside the
    /// selecting phase is a silent no-op (defensive UI re-entrancy).
    /// Returns whether the selection was accepted.
    pub fn select(&mut self, index: usize) -> bool {
        if self.game_phase != GamePhase::Selecting
            || self.selected_card_index.is_some()
            || index >= self.cards.len()
        {
            return false;
        }
        self.selected_card_index = Some(index);
        self.game_phase = GamePhase::Revealing;
        true
    }

    /// Fixed reveal order: non-selected indices ascending, then the
    /// selected card last. Empty until a card has been selected.
    pub fn reveal_order(&self) -> Vec<usize> {
        let Some(selected) = self.selected_card_index else {
            return Vec::new();
        };
        let mut order: Vec<usize> = (0..self.cards.len()).filter(|&i| i != selected).collect();
        order.push(selected);
        order
    }

    /// Flip the next card in reveal order
    ///
    /// Appends exactly one index per call; a no-op outside the revealing
    /// phase or once every card is face-up. Returns the revealed index.
    pub fn reveal_next(&mut self) -> Option<usize> {
        if self.game_phase != GamePhase::Revealing {
            return None;
        }
        let next = self.reveal_order().get(self.revealed_cards.len()).copied()?;
        self.revealed_cards.push(next);
        Some(next)
    }

    /// All cards face-up (completion precondition)
    pub fn all_revealed(&self) -> bool {
        self.revealed_cards.len() == self.cards.len()
    }

    pub fn is_complete(&self) -> bool {
        self.game_phase == GamePhase::Complete
    }
}
