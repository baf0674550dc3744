//! Contraindication board: entrance tracking and the one-time hover hint.
//!
//! Cards reveal themselves the first time they scroll into view and stay
//! revealed. A hint cursor appears after a short delay for users who have not
//! hovered any card yet; the first interaction hides it for good.

use std::collections::BTreeSet;

use log::debug;

use crate::config::BoardConfig;
use crate::content::{CONTRAINDICATIONS, Contraindication};
use crate::timer::{TimerSlot, TimerToken};

/// Intersection margin of error; browsers report ratios like 0.0999 on the
/// threshold crossing.
const RATIO_EPSILON: f64 = 1e-3;

/// One observation delivered by a [`VisibilityObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionReport {
    pub card_id: u8,
    pub is_intersecting: bool,
    /// Visible fraction of the card, 0.0..=1.0.
    pub ratio: f64,
}

/// Source of viewport-entry facts. The browser adapter wraps
/// `IntersectionObserver`; reports flow back through
/// [`ContraindicationBoard::apply_reports`].
pub trait VisibilityObserver {
    fn observe(&mut self, card_id: u8);
    fn disconnect(&mut self);
}

pub struct ContraindicationBoard {
    cards: &'static [Contraindication],
    config: BoardConfig,
    visible_cards: BTreeSet<u8>,
    show_hints: bool,
    has_interacted: bool,
    hint_timer: TimerSlot,
}

impl ContraindicationBoard {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            cards: CONTRAINDICATIONS,
            config,
            visible_cards: BTreeSet::new(),
            show_hints: false,
            has_interacted: false,
            hint_timer: TimerSlot::new(),
        }
    }

    pub fn cards(&self) -> &'static [Contraindication] {
        self.cards
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Register every card with the observer.
    pub fn attach<O: VisibilityObserver>(&self, observer: &mut O) {
        for card in self.cards {
            observer.observe(card.id);
        }
    }

    /// Arm the hint timer. The caller schedules the platform timer for
    /// `config().hint_delay_ms` and passes the token back on fire.
    pub fn start(&mut self) -> Option<TimerToken> {
        if self.has_interacted {
            return None;
        }
        Some(self.hint_timer.arm())
    }

    pub fn hint_timer_fired(&mut self, token: TimerToken) -> bool {
        if !self.hint_timer.fire(token) || self.has_interacted {
            return false;
        }
        debug!("showing hover hints");
        self.show_hints = true;
        true
    }

    /// First hover or touch on any card. Returns true only the first time.
    pub fn interact(&mut self) -> bool {
        if self.has_interacted {
            return false;
        }
        self.has_interacted = true;
        self.show_hints = false;
        self.hint_timer.cancel();
        true
    }

    /// Reveal a card. Returns true if it was not revealed before.
    pub fn mark_visible(&mut self, card_id: u8) -> bool {
        let newly = self.visible_cards.insert(card_id);
        if newly {
            debug!("card {card_id} entered viewport");
        }
        newly
    }

    /// Apply a batch of observations; returns the ids revealed by this batch.
    pub fn apply_reports(&mut self, reports: &[IntersectionReport]) -> Vec<u8> {
        let threshold = self.config.threshold;
        let mut revealed = Vec::new();
        for r in reports {
            if r.is_intersecting && r.ratio + RATIO_EPSILON >= threshold && self.mark_visible(r.card_id) {
                revealed.push(r.card_id);
            }
        }
        revealed
    }

    pub fn is_visible(&self, card_id: u8) -> bool {
        self.visible_cards.contains(&card_id)
    }

    pub fn visible_cards(&self) -> &BTreeSet<u8> {
        &self.visible_cards
    }

    pub fn has_interacted(&self) -> bool {
        self.has_interacted
    }

    pub fn hints_visible(&self) -> bool {
        self.show_hints && !self.has_interacted
    }

    /// Staggered entrance delay for the card at `index`.
    pub fn entrance_delay_ms(&self, index: usize) -> u32 {
        u32::try_from(index)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.config.stagger_ms)
    }

    pub fn teardown(&mut self) {
        self.hint_timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingObserver {
        observed: Vec<u8>,
        disconnected: bool,
    }

    impl VisibilityObserver for RecordingObserver {
        fn observe(&mut self, card_id: u8) {
            self.observed.push(card_id);
        }
        fn disconnect(&mut self) {
            self.disconnected = true;
        }
    }

    fn report(card_id: u8, ratio: f64) -> IntersectionReport {
        IntersectionReport {
            card_id,
            is_intersecting: ratio > 0.0,
            ratio,
        }
    }

    #[test]
    fn attach_observes_every_card() {
        let board = ContraindicationBoard::new(BoardConfig::default());
        let mut obs = RecordingObserver::default();
        board.attach(&mut obs);
        assert_eq!(obs.observed, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        obs.disconnect();
        assert!(obs.disconnected);
    }

    #[test]
    fn mark_visible_is_idempotent() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        assert!(board.mark_visible(3));
        assert!(!board.mark_visible(3));
        assert_eq!(board.visible_cards().len(), 1);
    }

    #[test]
    fn reports_below_threshold_are_ignored() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        let revealed = board.apply_reports(&[report(1, 0.05), report(2, 0.1), report(3, 0.0)]);
        assert_eq!(revealed, vec![2]);
        assert!(!board.is_visible(1));
    }

    #[test]
    fn leaving_the_viewport_keeps_card_revealed() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        board.apply_reports(&[report(4, 0.5)]);
        let revealed = board.apply_reports(&[report(4, 0.0), report(4, 0.8)]);
        assert!(revealed.is_empty());
        assert!(board.is_visible(4));
    }

    #[test]
    fn hint_appears_after_timer_without_interaction() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        let token = board.start().unwrap();
        assert!(!board.hints_visible());
        assert!(board.hint_timer_fired(token));
        assert!(board.hints_visible());
        assert!(board.interact());
        assert!(!board.hints_visible());
        assert!(!board.interact());
    }

    #[test]
    fn interaction_before_timer_suppresses_hint() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        let token = board.start().unwrap();
        board.interact();
        assert!(!board.hint_timer_fired(token));
        assert!(!board.hints_visible());
        assert!(board.start().is_none());
    }

    #[test]
    fn teardown_invalidates_hint_timer() {
        let mut board = ContraindicationBoard::new(BoardConfig::default());
        let token = board.start().unwrap();
        board.teardown();
        assert!(!board.hint_timer_fired(token));
    }

    #[test]
    fn entrance_delay_staggers_by_index() {
        let board = ContraindicationBoard::new(BoardConfig::default());
        assert_eq!(board.entrance_delay_ms(0), 0);
        assert_eq!(board.entrance_delay_ms(3), 240);
    }
}
