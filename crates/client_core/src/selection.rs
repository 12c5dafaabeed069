//! Keeps the model dropdown and the model cards in agreement, and clears
//! negative numeric input.

use std::time::Duration;

use shared::domain::{ModelId, NumericField};
use tracing::debug;

use crate::{types::FormState, view::ViewSink};

pub const DEFAULT_PRESS_EFFECT: Duration = Duration::from_millis(150);

/// Single source of truth for the selected model. The dropdown value and the
/// selected card are both projections of `selected`.
#[derive(Debug, Clone)]
pub struct InputSynchronizer {
    cards: Vec<ModelId>,
    selected: Option<ModelId>,
    press_effect: Duration,
}

impl InputSynchronizer {
    pub fn new(cards: impl IntoIterator<Item = ModelId>, press_effect: Duration) -> Self {
        let mut unique = Vec::new();
        for card in cards {
            if !unique.contains(&card) {
                unique.push(card);
            }
        }
        Self {
            cards: unique,
            selected: None,
            press_effect,
        }
    }

    pub fn selected(&self) -> Option<ModelId> {
        self.selected
    }

    pub fn cards(&self) -> &[ModelId] {
        &self.cards
    }

    pub fn press_effect(&self) -> Duration {
        self.press_effect
    }

    /// Card activation. Writes the dropdown, re-projects the cards and presses
    /// the activated card; the caller releases it after [`Self::press_effect`].
    pub fn select_model<S: ViewSink + ?Sized>(&mut self, model: ModelId, sink: &mut S) {
        debug!(model = %model, "model card activated");
        self.selected = Some(model);
        sink.set_dropdown_value(self.selected);
        self.project_cards(sink);
        sink.set_card_pressed(model, true);
    }

    pub fn release_press<S: ViewSink + ?Sized>(&self, model: ModelId, sink: &mut S) {
        sink.set_card_pressed(model, false);
    }

    /// Direct dropdown change. The dropdown already shows `value`; only the
    /// cards and the option tooltip follow.
    pub fn on_dropdown_change<S: ViewSink + ?Sized>(
        &mut self,
        value: Option<ModelId>,
        sink: &mut S,
    ) {
        debug!(model = ?value, "model dropdown changed");
        self.selected = value;
        self.project_cards(sink);
        if let Some(model) = value {
            sink.set_dropdown_tooltip(model, model.description());
        }
    }

    /// Clears `field` when its value is negative. Returns whether it was cleared.
    pub fn clamp_non_negative<S: ViewSink + ?Sized>(
        &self,
        form: &mut FormState,
        field: NumericField,
        sink: &mut S,
    ) -> bool {
        if !is_negative(form.value(field)) {
            return false;
        }
        debug!(field = field.name(), "cleared negative numeric input");
        form.set_value(field, "");
        sink.set_field_value(field, "");
        true
    }

    fn project_cards<S: ViewSink + ?Sized>(&self, sink: &mut S) {
        for card in &self.cards {
            sink.set_card_selected(*card, false);
        }
        if let Some(selected) = self.selected {
            if self.cards.contains(&selected) {
                sink.set_card_selected(selected, true);
            }
        }
    }
}

/// Text that does not parse as a number (including the empty string) is not
/// negative.
pub fn is_negative(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|number| number < 0.0)
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
