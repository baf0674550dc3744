//! Eye-mapping matching game.
//!
//! The player drags an eye shape onto a mapping style. Each shape has exactly
//! one correct style; the first correct drop locks the shape in and scores a
//! point. The game is complete once every shape is locked in.
//!
//! Drag transport is not modelled here: native drag events, click-to-select
//! and keyboard selection all end up in [`MappingGame::begin_drag`] and
//! [`MappingGame::attempt_drop`].

use std::collections::BTreeSet;

use log::{debug, info};

use crate::content::{Catalog, EyeShape};
use crate::error::GameError;
use crate::timer::{TimerSlot, TimerToken};

/// Result of a drop, shown as a toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub correct: bool,
    pub explanation: String,
}

/// Image shown in the zoom modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZoomedImage {
    pub src: String,
    pub alt: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeStatus {
    Unmatched,
    Matched,
}

/// What a resolved drop did. `clear_after` must be handed back to
/// [`MappingGame::expire_feedback`] once the feedback delay elapses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropOutcome {
    pub feedback: Feedback,
    /// True when this drop locked the shape in for the first time.
    pub newly_matched: bool,
    pub clear_after: TimerToken,
}

/// Mutable per-mount game state. Only [`MappingGame`] touches it.
#[derive(Debug, Default)]
pub struct GameState {
    score: u32,
    completed_shapes: BTreeSet<String>,
    dragged_item: Option<String>,
    feedback: Option<Feedback>,
    zoomed_image: Option<ZoomedImage>,
    show_guide: bool,
}

impl GameState {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn completed_shapes(&self) -> &BTreeSet<String> {
        &self.completed_shapes
    }

    pub fn dragged_item(&self) -> Option<&str> {
        self.dragged_item.as_deref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn zoomed_image(&self) -> Option<&ZoomedImage> {
        self.zoomed_image.as_ref()
    }

    pub fn show_guide(&self) -> bool {
        self.show_guide
    }
}

pub struct MappingGame {
    catalog: Catalog,
    state: GameState,
    feedback_timer: TimerSlot,
}

impl Default for MappingGame {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl MappingGame {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: GameState::default(),
            feedback_timer: TimerSlot::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn total_shapes(&self) -> usize {
        self.catalog.eye_shapes.len()
    }

    /// Pick up a shape. Shapes already matched may be picked up again; a
    /// repeated correct drop re-confirms without scoring.
    pub fn begin_drag(&mut self, shape_id: &str) -> Result<(), GameError> {
        if self.catalog.shape(shape_id).is_none() {
            return Err(GameError::UnknownShape(shape_id.to_owned()));
        }
        debug!("drag start: {shape_id}");
        self.state.dragged_item = Some(shape_id.to_owned());
        Ok(())
    }

    /// Let go of the held shape without dropping it anywhere, as when a
    /// native drag ends outside every zone.
    pub fn cancel_drag(&mut self) {
        if let Some(shape_id) = self.state.dragged_item.take() {
            debug!("drag cancelled: {shape_id}");
        }
    }

    /// Drop the held shape onto `style_id`.
    ///
    /// Returns `Ok(None)` when nothing is held, whatever the target. An
    /// unknown style leaves the state untouched, including the held shape.
    pub fn attempt_drop(&mut self, style_id: &str) -> Result<Option<DropOutcome>, GameError> {
        if self.state.dragged_item.is_none() {
            return Ok(None);
        }
        if self.catalog.style(style_id).is_none() {
            return Err(GameError::UnknownStyle(style_id.to_owned()));
        }
        let Some(shape_id) = self.state.dragged_item.take() else {
            return Ok(None);
        };
        let shape = self
            .catalog
            .shape(&shape_id)
            .ok_or_else(|| GameError::UnknownShape(shape_id.clone()))?;

        let correct = shape.correct_mapping == style_id;
        let explanation = if correct {
            shape.explanation.to_string()
        } else {
            self.mismatch_message(shape)
        };

        let newly_matched = correct && self.state.completed_shapes.insert(shape_id.clone());
        if newly_matched {
            self.state.score += 1;
        }
        debug_assert_eq!(self.state.completed_shapes.len(), self.state.score as usize);
        debug!("drop {shape_id} on {style_id}: correct={correct} score={}", self.state.score);
        if newly_matched && self.is_complete() {
            info!("mapping game complete with {} points", self.state.score);
        }

        let feedback = Feedback {
            correct,
            explanation,
        };
        self.state.feedback = Some(feedback.clone());
        Ok(Some(DropOutcome {
            feedback,
            newly_matched,
            clear_after: self.feedback_timer.arm(),
        }))
    }

    /// Called when a feedback timer fires. Stale tokens are ignored.
    pub fn expire_feedback(&mut self, token: TimerToken) -> bool {
        if self.feedback_timer.fire(token) {
            self.state.feedback = None;
            true
        } else {
            false
        }
    }

    /// Back to a fresh round. The guide panel is reference material and keeps
    /// its open/closed state.
    pub fn reset(&mut self) {
        debug!("mapping game reset");
        self.feedback_timer.cancel();
        self.state.score = 0;
        self.state.completed_shapes.clear();
        self.state.feedback = None;
        self.state.dragged_item = None;
        self.state.zoomed_image = None;
    }

    pub fn is_complete(&self) -> bool {
        self.state.completed_shapes.len() == self.total_shapes()
    }

    pub fn shape_status(&self, shape_id: &str) -> ShapeStatus {
        if self.state.completed_shapes.contains(shape_id) {
            ShapeStatus::Matched
        } else {
            ShapeStatus::Unmatched
        }
    }

    pub fn open_zoom(&mut self, src: &str, alt: &str) {
        self.state.zoomed_image = Some(ZoomedImage {
            src: src.to_owned(),
            alt: alt.to_owned(),
        });
    }

    pub fn close_zoom(&mut self) {
        self.state.zoomed_image = None;
    }

    pub fn open_guide(&mut self) {
        self.state.show_guide = true;
    }

    pub fn close_guide(&mut self) {
        self.state.show_guide = false;
    }

    /// Invalidate the pending feedback timer. Used on unmount.
    pub fn teardown(&mut self) {
        self.feedback_timer.cancel();
    }

    fn mismatch_message(&self, shape: &EyeShape) -> String {
        let required = self
            .catalog
            .style(&shape.correct_mapping)
            .map(|s| &*s.title)
            .unwrap_or(&*shape.correct_mapping);
        format!("Error! {} requires {}.", shape.title, required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_pair(game: &mut MappingGame, shape: &str, style: &str) -> DropOutcome {
        game.begin_drag(shape).unwrap();
        game.attempt_drop(style).unwrap().unwrap()
    }

    #[test]
    fn drop_without_drag_is_noop() {
        let mut game = MappingGame::default();
        assert_eq!(game.attempt_drop("naturel"), Ok(None));
        assert!(game.state().feedback().is_none());
    }

    #[test]
    fn drop_without_drag_ignores_unknown_style() {
        let mut game = MappingGame::default();
        assert_eq!(game.attempt_drop("volume"), Ok(None));
        assert!(game.state().feedback().is_none());
    }

    #[test]
    fn cancelled_drag_no_longer_drops() {
        let mut game = MappingGame::default();
        game.begin_drag("droopy-eyes").unwrap();
        game.cancel_drag();
        assert!(game.state().dragged_item().is_none());
        assert_eq!(game.attempt_drop("oeil-de-biche"), Ok(None));
        assert_eq!(game.state().score(), 0);

        // Harmless once the drop already consumed the shape.
        drop_pair(&mut game, "droopy-eyes", "oeil-de-biche");
        game.cancel_drag();
        assert_eq!(game.state().score(), 1);
        assert!(game.state().feedback().is_some());
    }

    #[test]
    fn unknown_ids_leave_state_untouched() {
        let mut game = MappingGame::default();
        assert_eq!(
            game.begin_drag("almond-eyes"),
            Err(GameError::UnknownShape("almond-eyes".into()))
        );
        assert!(game.state().dragged_item().is_none());

        game.begin_drag("round-eyes").unwrap();
        assert_eq!(
            game.attempt_drop("volume"),
            Err(GameError::UnknownStyle("volume".into()))
        );
        assert_eq!(game.state().dragged_item(), Some("round-eyes"));
    }

    #[test]
    fn correct_drop_scores_and_locks_shape() {
        let mut game = MappingGame::default();
        let out = drop_pair(&mut game, "round-eyes", "naturel");
        assert!(out.feedback.correct);
        assert!(out.newly_matched);
        assert_eq!(game.state().score(), 1);
        assert_eq!(game.shape_status("round-eyes"), ShapeStatus::Matched);
        assert_eq!(game.shape_status("small-eyes"), ShapeStatus::Unmatched);
        assert!(game.state().dragged_item().is_none());
    }

    #[test]
    fn rematching_a_completed_shape_does_not_score() {
        let mut game = MappingGame::default();
        drop_pair(&mut game, "small-eyes", "oeil-de-chaton");
        let again = drop_pair(&mut game, "small-eyes", "oeil-de-chaton");
        assert!(again.feedback.correct);
        assert!(!again.newly_matched);
        assert_eq!(game.state().score(), 1);
    }

    #[test]
    fn wrong_drop_names_required_style() {
        let mut game = MappingGame::default();
        let out = drop_pair(&mut game, "wide-set-eyes", "naturel");
        assert!(!out.feedback.correct);
        assert_eq!(out.feedback.explanation, "Error! Wide-Set Eyes requires Doll Eye.");
        assert_eq!(game.state().score(), 0);
        assert!(game.state().dragged_item().is_none());
    }

    #[test]
    fn stale_feedback_timer_does_not_clear_newer_feedback() {
        let mut game = MappingGame::default();
        let first = drop_pair(&mut game, "round-eyes", "oeil-ouvert");
        let second = drop_pair(&mut game, "round-eyes", "naturel");
        assert!(!game.expire_feedback(first.clear_after));
        assert_eq!(game.state().feedback(), Some(&second.feedback));
        assert!(game.expire_feedback(second.clear_after));
        assert!(game.state().feedback().is_none());
    }

    #[test]
    fn reset_invalidates_pending_feedback_timer() {
        let mut game = MappingGame::default();
        let out = drop_pair(&mut game, "round-eyes", "naturel");
        game.reset();
        assert!(!game.expire_feedback(out.clear_after));
    }

    #[test]
    fn zoom_and_guide_are_independent_of_progress() {
        let mut game = MappingGame::default();
        game.open_zoom("/images/naturel.png", "Natural");
        game.open_guide();
        drop_pair(&mut game, "round-eyes", "naturel");
        assert_eq!(game.state().zoomed_image().unwrap().alt, "Natural");
        game.close_zoom();
        assert!(game.state().zoomed_image().is_none());

        game.reset();
        assert!(game.state().show_guide());
        game.close_guide();
        assert!(!game.state().show_guide());
    }
}
