//! In-memory page: a [`ViewSink`] that keeps the latest value of every element.

use std::collections::{BTreeMap, HashMap};

use shared::domain::{ModelId, NumericField};

use crate::{
    types::{ElementId, Region},
    view::ViewSink,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardView {
    pub selected: bool,
    pub pressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub enabled: bool,
    pub label: String,
}

#[derive(Debug, Clone)]
pub struct PageModel {
    texts: HashMap<ElementId, String>,
    lists: HashMap<ElementId, Vec<String>>,
    table_rows: Vec<Vec<String>>,
    results_visible: bool,
    error_visible: bool,
    scrolls: Vec<Region>,
    trigger: TriggerView,
    dropdown: Option<ModelId>,
    tooltips: HashMap<ModelId, String>,
    cards: BTreeMap<ModelId, CardView>,
    fields: HashMap<NumericField, String>,
}

impl PageModel {
    /// A page carrying one card per given model. Both regions start hidden.
    pub fn new(cards: &[ModelId]) -> Self {
        Self {
            texts: HashMap::new(),
            lists: HashMap::new(),
            table_rows: Vec::new(),
            results_visible: false,
            error_visible: false,
            scrolls: Vec::new(),
            trigger: TriggerView {
                enabled: true,
                label: String::new(),
            },
            dropdown: None,
            tooltips: HashMap::new(),
            cards: cards
                .iter()
                .map(|card| (*card, CardView::default()))
                .collect(),
            fields: HashMap::new(),
        }
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.texts.get(&element).map(String::as_str)
    }

    pub fn list(&self, element: ElementId) -> &[String] {
        self.lists.get(&element).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn table_rows(&self) -> &[Vec<String>] {
        &self.table_rows
    }

    pub fn is_visible(&self, region: Region) -> bool {
        match region {
            Region::Results => self.results_visible,
            Region::Error => self.error_visible,
        }
    }

    /// Every scroll request in the order it was made.
    pub fn scrolls(&self) -> &[Region] {
        &self.scrolls
    }

    pub fn trigger(&self) -> &TriggerView {
        &self.trigger
    }

    pub fn dropdown(&self) -> Option<ModelId> {
        self.dropdown
    }

    pub fn tooltip(&self, model: ModelId) -> Option<&str> {
        self.tooltips.get(&model).map(String::as_str)
    }

    pub fn card(&self, model: ModelId) -> Option<CardView> {
        self.cards.get(&model).copied()
    }

    pub fn selected_cards(&self) -> Vec<ModelId> {
        self.cards
            .iter()
            .filter(|(_, card)| card.selected)
            .map(|(model, _)| *model)
            .collect()
    }

    pub fn field_value(&self, field: NumericField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

impl ViewSink for PageModel {
    fn set_text(&mut self, element: ElementId, text: &str) {
        self.texts.insert(element, text.to_string());
    }

    fn set_list(&mut self, element: ElementId, items: &[String]) {
        self.lists.insert(element, items.to_vec());
    }

    fn clear_table(&mut self) {
        self.table_rows.clear();
    }

    fn append_table_row(&mut self, cells: &[String]) {
        self.table_rows.push(cells.to_vec());
    }

    fn set_region_visible(&mut self, region: Region, visible: bool) {
        match region {
            Region::Results => self.results_visible = visible,
            Region::Error => self.error_visible = visible,
        }
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.scrolls.push(region);
    }

    fn set_trigger(&mut self, enabled: bool, label: &str) {
        self.trigger = TriggerView {
            enabled,
            label: label.to_string(),
        };
    }

    fn set_dropdown_value(&mut self, value: Option<ModelId>) {
        self.dropdown = value;
    }

    fn set_dropdown_tooltip(&mut self, model: ModelId, tooltip: &str) {
        self.tooltips.insert(model, tooltip.to_string());
    }

    fn set_card_selected(&mut self, card: ModelId, selected: bool) {
        if let Some(view) = self.cards.get_mut(&card) {
            view.selected = selected;
        }
    }

    fn set_card_pressed(&mut self, card: ModelId, pressed: bool) {
        if let Some(view) = self.cards.get_mut(&card) {
            view.pressed = pressed;
        }
    }

    fn set_field_value(&mut self, field: NumericField, value: &str) {
        self.fields.insert(field, value.to_string());
    }
}
