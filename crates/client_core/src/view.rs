//! The side-effecting view binding driven by the controller.

use shared::domain::{ModelId, NumericField};

use crate::types::{ElementId, Region};

/// Sink for every visible effect of the prediction page.
///
/// Implementations render to whatever surface hosts the form. Text passed to
/// [`ViewSink::set_text`] and [`ViewSink::set_list`] is plain text and must
/// never be interpreted as markup.
pub trait ViewSink: Send {
    fn set_text(&mut self, element: ElementId, text: &str);
    fn set_list(&mut self, element: ElementId, items: &[String]);
    fn clear_table(&mut self);
    fn append_table_row(&mut self, cells: &[String]);
    fn set_region_visible(&mut self, region: Region, visible: bool);
    /// Smooth-scrolls the region into the viewport.
    fn scroll_into_view(&mut self, region: Region);
    fn set_trigger(&mut self, enabled: bool, label: &str);
    fn set_dropdown_value(&mut self, value: Option<ModelId>);
    fn set_dropdown_tooltip(&mut self, model: ModelId, tooltip: &str);
    fn set_card_selected(&mut self, card: ModelId, selected: bool);
    fn set_card_pressed(&mut self, card: ModelId, pressed: bool);
    fn set_field_value(&mut self, field: NumericField, value: &str);
}
